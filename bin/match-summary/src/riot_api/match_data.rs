use anyhow::Context;
use match_summary_model::{
    BannedChampion, ChampionId, MatchRecord, Participant, ProfileIconId, SummonerId, TeamSide,
};
use riven::consts::RegionalRoute;
use riven::{models::match_v5::Match, RiotApi};
use std::sync::Arc;
use tracing::{debug, warn};

/// Champion ID the Riot API reports for a skipped ban.
const NO_BAN: i32 = -1;

/// Requester for fetching [`Match`] data from the Riot API given a match ID.
pub struct MatchDataRequester {
    riot_api: Arc<RiotApi>,
}

impl std::fmt::Debug for MatchDataRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchDataRequester").finish()
    }
}

impl MatchDataRequester {
    pub fn new(riot_api: Arc<RiotApi>) -> Self {
        Self { riot_api }
    }

    /// Fetch [`Match`] data from Riot API given a match ID. Returns [`None`]
    /// when no such match exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_match(
        &self,
        route: RegionalRoute,
        match_id: &str,
    ) -> anyhow::Result<Option<Match>> {
        let match_data = self
            .riot_api
            .match_v5()
            .get_match(route, match_id)
            .await
            .context("Failed to fetch match from Riot API")?;
        debug!("Fetched match data: {:?}", match_data.is_some());
        Ok(match_data)
    }
}

/// Flatten a Riot API match into the record the summary is built from.
pub fn match_record(data: &Match) -> MatchRecord {
    let participants = data
        .info
        .participants
        .iter()
        .filter_map(|participant| {
            let champion_id = match participant.champion() {
                Ok(champion) => ChampionId(champion.0),
                Err(e) => {
                    warn!("Skipping participant with unknown champion: {e:?}");
                    return None;
                }
            };
            Some(Participant {
                team: TeamSide::from(u16::from(participant.team_id)),
                champion_id,
                profile_icon_id: ProfileIconId(participant.profile_icon),
                summoner_name: participant.summoner_name.clone(),
                summoner_id: player_id(&participant.puuid),
            })
        })
        .collect();

    let banned_champions = data
        .info
        .teams
        .iter()
        .flat_map(|team| {
            ban_entries(
                u16::from(team.team_id),
                team.bans
                    .iter()
                    .map(|ban| (ban.champion_id.0, ban.pick_turn)),
            )
        })
        .collect();

    MatchRecord {
        participants,
        banned_champions,
    }
}

/// Order one team's bans by pick turn and number them, leaving out skipped bans.
fn ban_entries(
    team_id: u16,
    bans: impl Iterator<Item = (i32, i32)>,
) -> Vec<BannedChampion> {
    let mut bans: Vec<(i32, i32)> = bans.filter(|(champion, _)| *champion != NO_BAN).collect();
    bans.sort_by_key(|(_, pick_turn)| *pick_turn);
    bans.into_iter()
        .enumerate()
        .map(|(ban_order, (champion, _))| BannedChampion {
            team: team_id.into(),
            champion_id: ChampionId(champion),
            ban_order: ban_order as u8,
        })
        .collect()
}

// Riot keys mastery by PUUID; bots and anonymised players come back blank
fn player_id(puuid: &str) -> Option<SummonerId> {
    let puuid = puuid.trim();
    (!puuid.is_empty() && puuid != "BOT").then(|| SummonerId(puuid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use riven::consts::Champion;

    #[test]
    fn test_bans_follow_pick_turn() {
        let bans = ban_entries(200, [(55, 9), (12, 7), (NO_BAN, 8), (99, 10)].into_iter());
        let champions: Vec<(i32, u8)> = bans
            .iter()
            .map(|ban| (ban.champion_id.0, ban.ban_order))
            .collect();
        assert_eq!(champions, vec![(12, 0), (55, 1), (99, 2)]);
        assert!(bans.iter().all(|ban| ban.team == TeamSide::Red));
    }

    #[test]
    fn test_champion_ids_carry_riven_values() {
        let bans = ban_entries(100, [(Champion::AATROX.0, 1), (Champion::ANNIE.0, 2)].into_iter());
        assert_eq!(bans[0].champion_id, ChampionId(266));
        assert_eq!(bans[1].champion_id, ChampionId(Champion::ANNIE.0));
    }

    #[test]
    fn test_no_bans() {
        assert!(ban_entries(100, std::iter::empty()).is_empty());
    }

    #[test]
    fn test_player_id() {
        assert_eq!(player_id("abc"), Some(SummonerId("abc".into())));
        assert_eq!(player_id(""), None);
        assert_eq!(player_id("BOT"), None);
    }
}
