use match_summary_enrich::{BanSlot, Fetch, Image, RowContent, SummaryBoard};
use match_summary_model::{Participant, RowAddress, Section};

/// Text rendering of a resolved summary, one line per row under each section
/// header. Absent fields print as `-`.
pub fn build_summary(board: &SummaryBoard) -> String {
    let partitioned = board.partitioned();
    let mut message = String::new();
    for section in Section::ALL {
        message += &format!("**{}**\n", section.title());
        for index in 0..partitioned.row_count(section) {
            let Some(row) = board.row(RowAddress::new(section, index)) else {
                continue;
            };
            let line = match &row.content {
                RowContent::Bans(bans) => {
                    let slots: Vec<String> = bans.slots.iter().map(ban_slot).collect();
                    format!("{}: {}", bans.side, slots.join(" "))
                }
                RowContent::Participant(row) => format!(
                    "{} - champion {} {} | icon {} {} | mastery {}",
                    row.participant.summoner_name,
                    row.participant.champion_id,
                    image(&row.champion_image),
                    row.participant.profile_icon_id,
                    image(&row.summoner_image),
                    match &row.mastery {
                        Fetch::Resolved(Some(level)) => level.to_string(),
                        _ => "-".to_string(),
                    }
                ),
            };
            message += &format!("{}) {}\n", index + 1, line);
        }
    }
    message
}

pub fn build_selection(participant: &Participant) -> String {
    format!(
        "Selected {} ({} side) on champion {}",
        participant.summoner_name, participant.team, participant.champion_id
    )
}

fn ban_slot(slot: &BanSlot) -> String {
    match slot {
        BanSlot::Empty => "[ ]".to_string(),
        BanSlot::Filled { champion_id, image: fetch } => {
            format!("[{champion_id} {}]", image(fetch))
        }
    }
}

fn image(fetch: &Fetch<Image>) -> String {
    match fetch.value() {
        Some(image) => format!("({} B)", image.bytes.len()),
        None => "(-)".to_string(),
    }
}
