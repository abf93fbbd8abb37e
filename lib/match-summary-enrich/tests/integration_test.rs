mod common;

use common::{
    champion_url, full_match, icon_url, image_for, participant, FakeChampions, FakeImages,
    FakeMasteries, FakeProfileIcons, Fakes, MASTERY_LEVEL,
};
use match_summary_enrich::{BanSlot, Fetch, Field, RowContent, RowUpdate, SummaryBoard};
use match_summary_model::{
    partition, ChampionId, MatchRecord, ProfileIconId, RowAddress, Section, SummonerId, TeamSide,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

/// Bind and enrich every row, then apply updates until nothing is pending.
async fn run_summary(fakes: &Fakes, record: &MatchRecord) -> SummaryBoard {
    let enricher = fakes.enricher();
    let mut board = SummaryBoard::new(partition(record));
    let (tx, mut rx) = unbounded_channel();

    let addresses: Vec<RowAddress> = board.partitioned().addresses().collect();
    for address in addresses {
        let ticket = board.bind(address).unwrap();
        enricher.enrich(board.partitioned(), ticket, &tx).unwrap();
    }

    drain(&mut board, &mut rx).await;
    board
}

async fn drain(board: &mut SummaryBoard, rx: &mut UnboundedReceiver<RowUpdate>) {
    while !board.is_complete() {
        let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("Enrichment stalled")
            .expect("Channel closed with rows pending");
        board.apply(update);
    }
}

#[tokio::test]
async fn test_champion_lookup_error_resolves_absent() {
    let fakes = Fakes {
        champions: Arc::new(FakeChampions {
            failing: [42].into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    let enricher = fakes.enricher();

    assert_eq!(enricher.fetch_champion_image(ChampionId(42)).await, None);
    assert_eq!(fakes.champions.calls.load(Ordering::SeqCst), 1);
    assert_eq!(fakes.images.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_champion_without_square_image_resolves_absent() {
    let fakes = Fakes {
        champions: Arc::new(FakeChampions {
            without_square: [3].into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    let enricher = fakes.enricher();

    assert_eq!(enricher.fetch_champion_image(ChampionId(3)).await, None);
    assert_eq!(fakes.images.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_champion_image_loads_square() {
    let fakes = Fakes::default();
    let enricher = fakes.enricher();

    let image = enricher.fetch_champion_image(ChampionId(7)).await;
    assert_eq!(image, Some(image_for(&champion_url(ChampionId(7)))));
}

#[tokio::test]
async fn test_image_load_failure_resolves_absent() {
    let fakes = Fakes {
        images: Arc::new(FakeImages {
            failing: [icon_url(ProfileIconId(9))].into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    let enricher = fakes.enricher();

    assert_eq!(enricher.fetch_summoner_image(ProfileIconId(9)).await, None);
    assert_eq!(fakes.profile_icons.calls.load(Ordering::SeqCst), 1);
    assert_eq!(fakes.images.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_profile_icon_resolves_absent() {
    let fakes = Fakes {
        profile_icons: Arc::new(FakeProfileIcons {
            missing: [11].into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    let enricher = fakes.enricher();

    assert_eq!(enricher.fetch_summoner_image(ProfileIconId(11)).await, None);
    assert_eq!(fakes.images.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_mastery_without_summoner_id_is_never_requested() {
    let fakes = Fakes::default();
    let enricher = fakes.enricher();

    assert_eq!(enricher.fetch_champion_mastery(None, ChampionId(1)).await, None);
    assert_eq!(fakes.masteries.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_mastery_level_and_failure() {
    let fakes = Fakes::default();
    let summoner_id = SummonerId("puuid".into());
    let level = fakes
        .enricher()
        .fetch_champion_mastery(Some(&summoner_id), ChampionId(1))
        .await;
    assert_eq!(level, Some(MASTERY_LEVEL));

    let failing = Fakes {
        masteries: Arc::new(FakeMasteries {
            failing: true,
            ..Default::default()
        }),
        ..Default::default()
    };
    let level = failing
        .enricher()
        .fetch_champion_mastery(Some(&summoner_id), ChampionId(1))
        .await;
    assert_eq!(level, None);
    assert_eq!(failing.masteries.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_participant_row_without_summoner_id() {
    let fakes = Fakes::default();
    let record = MatchRecord {
        participants: vec![participant(TeamSide::Red, 5, None)],
        banned_champions: vec![],
    };

    let board = run_summary(&fakes, &record).await;

    let row = board.row(RowAddress::new(Section::Red, 0)).unwrap();
    let RowContent::Participant(row) = &row.content else {
        panic!("expected a participant row");
    };
    assert_eq!(row.mastery, Fetch::Resolved(None));
    assert!(row.champion_image.value().is_some());
    assert!(row.summoner_image.value().is_some());
    assert_eq!(fakes.masteries.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_one_failed_field_does_not_block_the_others() {
    let fakes = Fakes {
        champions: Arc::new(FakeChampions {
            failing: [1].into(),
            ..Default::default()
        }),
        ..Default::default()
    };

    let board = run_summary(&fakes, &full_match()).await;

    let RowContent::Participant(row) = &board
        .row(RowAddress::new(Section::Blue, 0))
        .unwrap()
        .content
    else {
        panic!("expected a participant row");
    };
    assert_eq!(row.champion_image, Fetch::Resolved(None));
    assert_eq!(
        row.summoner_image.value(),
        Some(&image_for(&icon_url(ProfileIconId(4001))))
    );
    assert_eq!(row.mastery.value(), Some(&MASTERY_LEVEL));

    let RowContent::Participant(neighbour) = &board
        .row(RowAddress::new(Section::Blue, 1))
        .unwrap()
        .content
    else {
        panic!("expected a participant row");
    };
    assert!(neighbour.champion_image.value().is_some());
}

#[tokio::test]
async fn test_full_summary_fetch_counts() {
    let fakes = Fakes::default();

    let board = run_summary(&fakes, &full_match()).await;

    // Ten portraits plus three bans per side
    assert_eq!(fakes.champions.calls.load(Ordering::SeqCst), 16);
    assert_eq!(fakes.profile_icons.calls.load(Ordering::SeqCst), 10);
    assert_eq!(fakes.masteries.calls.load(Ordering::SeqCst), 10);
    assert_eq!(fakes.images.calls.load(Ordering::SeqCst), 26);

    for index in 0..2 {
        let RowContent::Bans(bans) = &board
            .row(RowAddress::new(Section::Bans, index))
            .unwrap()
            .content
        else {
            panic!("expected a ban row");
        };
        for slot in &bans.slots[..3] {
            assert!(matches!(
                slot,
                BanSlot::Filled {
                    image: Fetch::Resolved(Some(_)),
                    ..
                }
            ));
        }
        assert_eq!(bans.slots[3], BanSlot::Empty);
        assert_eq!(bans.slots[4], BanSlot::Empty);
    }
}

#[tokio::test]
async fn test_ban_row_fetches_only_occupied_slots() {
    let fakes = Fakes::default();
    let enricher = fakes.enricher();
    let partitioned = partition(&full_match());
    let mut board = SummaryBoard::new(partitioned.clone());
    let (tx, mut rx) = unbounded_channel();

    let ticket = board.bind(RowAddress::new(Section::Bans, 1)).unwrap();
    let handles = enricher.enrich(&partitioned, ticket, &tx).unwrap();
    assert_eq!(handles.len(), 3);
    for handle in handles {
        handle.await.unwrap();
    }

    let mut slots = Vec::new();
    while let Ok(update) = rx.try_recv() {
        let Field::BanImage { slot, image } = &update.field else {
            panic!("expected a ban image");
        };
        assert!(image.is_some());
        slots.push(*slot);
        board.apply(update);
    }
    slots.sort();
    assert_eq!(slots, vec![0, 1, 2]);
    assert!(board.is_complete());
}

#[tokio::test]
async fn test_final_state_is_independent_of_arrival_order() {
    let record = MatchRecord {
        participants: vec![participant(TeamSide::Blue, 1, Some("puuid"))],
        banned_champions: vec![],
    };
    let champion = champion_url(ChampionId(1));
    let icon = icon_url(ProfileIconId(4001));

    let champion_first = Fakes {
        images: Arc::new(FakeImages {
            delays: [(icon.clone(), Duration::from_millis(30))].into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    let icon_first = Fakes {
        images: Arc::new(FakeImages {
            delays: [(champion, Duration::from_millis(30))].into(),
            ..Default::default()
        }),
        ..Default::default()
    };

    let first = run_summary(&champion_first, &record).await;
    let second = run_summary(&icon_first, &record).await;

    let address = RowAddress::new(Section::Blue, 0);
    assert_eq!(first.row(address), second.row(address));
}

#[tokio::test]
async fn test_rebinding_drops_results_of_previous_binding() {
    let fakes = Fakes::default();
    let enricher = fakes.enricher();
    let record = full_match();
    let mut board = SummaryBoard::new(partition(&record));
    let (tx, mut rx) = unbounded_channel();
    let address = RowAddress::new(Section::Red, 2);

    let stale = board.bind(address).unwrap();
    for handle in enricher.enrich(board.partitioned(), stale, &tx).unwrap() {
        handle.await.unwrap();
    }
    let current = board.bind(address).unwrap();

    let mut applied = 0;
    while let Ok(update) = rx.try_recv() {
        assert_eq!(update.ticket, stale);
        if board.apply(update) {
            applied += 1;
        }
    }
    assert_eq!(applied, 0);
    assert!(!board.is_complete());

    enricher.enrich(board.partitioned(), current, &tx).unwrap();
    drain(&mut board, &mut rx).await;
    assert_eq!(board.row(address).unwrap().generation, current.generation);
}

#[tokio::test]
async fn test_out_of_range_row_is_rejected() {
    let fakes = Fakes::default();
    let enricher = fakes.enricher();
    let mut board = SummaryBoard::new(partition(&full_match()));
    let (tx, _rx) = unbounded_channel();

    let count = board.partitioned().row_count(Section::Blue);
    assert!(board.bind(RowAddress::new(Section::Blue, count)).is_err());

    let ticket = board.bind(RowAddress::new(Section::Blue, 0)).unwrap();
    let bogus = match_summary_enrich::RowTicket {
        address: RowAddress::new(Section::Blue, count),
        ..ticket
    };
    assert!(enricher.enrich(board.partitioned(), bogus, &tx).is_err());
    assert_eq!(fakes.champions.calls.load(Ordering::SeqCst), 0);
}
