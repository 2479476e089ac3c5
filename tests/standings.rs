//! Integration tests for standings: league tables, sub-groups, knockout rounds, filters.

use fixture_standings::{
    available_categories, available_competitions, compute_standings, Match, Outcome, Selection,
    Side, StandingsEntry, StandingsFilter, StandingsGroup,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn played(id: &str, home: &str, away: &str, date: &str, sh: u32, sa: u32) -> Match {
    Match::new(id, "Liga", home, away)
        .on(date, "20:00")
        .with_score(sh, sa)
}

fn all(matches: &[Match]) -> Vec<StandingsGroup> {
    compute_standings(matches, &StandingsFilter::default())
}

fn entry<'a>(entries: &'a [StandingsEntry], team: &str) -> &'a StandingsEntry {
    entries.iter().find(|e| e.team == team).unwrap()
}

fn teams(entries: &[StandingsEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.team.as_str()).collect()
}

#[test]
fn three_team_table_totals_and_order() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 10, 8),
        played("2", "B", "C", "2026-03-02", 12, 9),
        played("3", "A", "C", "2026-03-03", 15, 5),
    ];
    let groups = all(&matches);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].competition, "Liga");
    assert!(groups[0].bracket_rounds.is_empty());
    assert_eq!(groups[0].sub_groups.len(), 1);
    assert_eq!(groups[0].sub_groups[0].label, None);

    let entries = &groups[0].sub_groups[0].entries;
    assert_eq!(teams(entries), ["A", "B", "C"]);

    let a = entry(entries, "A");
    assert_eq!((a.played, a.won, a.lost), (2, 2, 0));
    assert_eq!((a.points_for, a.points_against, a.diff, a.points), (25, 13, 12, 4));

    let b = entry(entries, "B");
    assert_eq!((b.played, b.won, b.lost), (2, 1, 1));
    assert_eq!((b.points_for, b.points_against, b.diff, b.points), (20, 19, 1, 3));

    let c = entry(entries, "C");
    assert_eq!((c.played, c.won, c.lost), (2, 0, 2));
    assert_eq!((c.points_for, c.points_against, c.diff, c.points), (14, 27, -13, 2));

    assert_eq!(Vec::from(b.streak.clone()), [Outcome::Loss, Outcome::Win]);
}

#[test]
fn equal_points_ranked_by_differential() {
    let matches = vec![
        played("1", "A", "X", "2026-03-01", 10, 0),
        played("2", "B", "Y", "2026-03-01", 10, 5),
    ];
    let groups = all(&matches);
    assert_eq!(teams(&groups[0].sub_groups[0].entries), ["A", "B", "Y", "X"]);
}

#[test]
fn equal_points_and_differential_ranked_by_points_scored() {
    let matches = vec![
        played("1", "B", "Y", "2026-03-01", 15, 5),
        played("2", "A", "X", "2026-03-01", 20, 10),
    ];
    let groups = all(&matches);
    assert_eq!(teams(&groups[0].sub_groups[0].entries), ["A", "B", "X", "Y"]);
}

#[test]
fn streak_keeps_five_most_recent_by_date() {
    // A: W W L W L L W in calendar order, supplied newest first.
    let results = [(30, 20), (30, 20), (20, 30), (30, 20), (20, 30), (20, 30), (30, 20)];
    let mut matches: Vec<Match> = results
        .iter()
        .enumerate()
        .map(|(i, &(sh, sa))| {
            played(&format!("m{i}"), "A", &format!("O{i}"), &format!("2026-01-0{}", i + 1), sh, sa)
        })
        .collect();
    matches.reverse();

    let groups = all(&matches);
    let a = entry(&groups[0].sub_groups[0].entries, "A");
    assert_eq!(a.played, 7);
    use Outcome::{Loss as L, Win as W};
    assert_eq!(Vec::from(a.streak.clone()), [L, W, L, L, W]);
}

#[test]
fn same_day_streak_uses_kickoff_time() {
    let matches = vec![
        Match::new("2", "Liga", "A", "B").on("2026-05-01", "21:00").with_score(50, 60),
        Match::new("1", "Liga", "A", "C").on("2026-05-01", "18:00").with_score(70, 60),
    ];
    let groups = all(&matches);
    let a = entry(&groups[0].sub_groups[0].entries, "A");
    assert_eq!(Vec::from(a.streak.clone()), [Outcome::Win, Outcome::Loss]);
}

#[test]
fn totals_and_ranking_do_not_depend_on_input_order() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 70, 65),
        played("2", "C", "D", "2026-03-01", 80, 60),
        played("3", "A", "C", "2026-03-08", 55, 58),
        played("4", "B", "D", "2026-03-08", 71, 70),
        played("5", "A", "D", "2026-03-15", 90, 60),
        played("6", "B", "C", "2026-03-15", 64, 66),
        played("7", "D", "A", "2026-03-22", 61, 59),
        played("8", "C", "B", "2026-03-22", 49, 62),
        Match::new("9", "Liga", "A", "B").on("2026-03-29", "20:00"),
    ];
    let expected = all(&matches);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let mut shuffled = matches.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(all(&shuffled), expected);
    }
}

#[test]
fn repeated_computation_is_identical() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 70, 65).with_stage("Grupo 1"),
        played("2", "C", "D", "2026-03-01", 80, 60).with_stage("Grupo 2"),
        played("3", "A", "C", "2026-04-01", 80, 60).with_stage("Final"),
    ];
    assert_eq!(all(&matches), all(&matches));
}

#[test]
fn unfinished_rest_and_level_matches_add_nothing() {
    let mut one_score = Match::new("2", "Liga", "A", "C").on("2026-03-02", "20:00");
    one_score.score_home = Some(40);
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 10, 8),
        one_score,
        Match::new("3", "Liga", "B", "D").on("2026-03-03", "20:00"),
        played("4", "Libre", "A", "2026-03-04", 0, 20).rest(),
        played("5", "B", "E", "2026-03-05", 9, 9),
    ];
    let groups = all(&matches);
    let entries = &groups[0].sub_groups[0].entries;
    assert_eq!(teams(entries), ["A", "B"]);
    assert_eq!(entry(entries, "A").played, 1);
    assert_eq!(entry(entries, "B").points_for, 8);
}

#[test]
fn competition_without_finished_matches_is_dropped() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 10, 8),
        Match::new("2", "Copa", "A", "B").on("2026-03-02", "20:00"),
    ];
    let groups = all(&matches);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].competition, "Liga");
    assert!(all(&[]).is_empty());
}

#[test]
fn unnamed_competition_gets_default_bucket() {
    let matches = vec![Match::new("1", "", "A", "B").on("2026-03-01", "20:00").with_score(3, 1)];
    assert_eq!(all(&matches)[0].competition, "Sin torneo");
}

#[test]
fn groups_and_playoffs_side_by_side() {
    let matches = vec![
        played("f", "A", "C", "2026-04-10", 60, 50).with_stage("Final"),
        played("1", "A", "B", "2026-03-01", 70, 65).with_stage("Grupo 1"),
        played("2", "C", "D", "2026-03-01", 80, 60).with_stage("Grupo 2"),
        played("s1", "A", "D", "2026-04-01", 60, 50).with_stage("Semifinal"),
        played("s2", "C", "B", "2026-04-01", 60, 50).with_stage("Semifinal"),
    ];
    let groups = all(&matches);
    assert_eq!(groups.len(), 1);
    let g = &groups[0];

    let labels: Vec<_> = g.sub_groups.iter().map(|s| s.label.as_deref()).collect();
    assert_eq!(labels, [Some("Grupo 1"), Some("Grupo 2")]);
    assert_eq!(teams(&g.sub_groups[0].entries), ["A", "B"]);
    assert_eq!(teams(&g.sub_groups[1].entries), ["C", "D"]);

    let rounds: Vec<_> = g.bracket_rounds.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(rounds, ["Semifinal", "Final"]);
    assert_eq!(g.bracket_rounds[0].matches.len(), 2);
}

#[test]
fn unlabeled_matches_get_their_own_table_when_groups_exist() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 70, 65).with_stage("Grupo A"),
        played("2", "C", "D", "2026-03-01", 80, 60).with_stage("Grupo B"),
        played("3", "E", "F", "2026-03-01", 80, 60),
    ];
    let groups = all(&matches);
    let labels: Vec<_> = groups[0].sub_groups.iter().map(|s| s.label.as_deref()).collect();
    assert_eq!(labels, [Some("Grupo A"), Some("Grupo B"), None]);
}

#[test]
fn single_group_label_means_single_unlabeled_table() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 70, 65).with_stage("Zona Única"),
        played("2", "C", "A", "2026-03-08", 80, 60).with_stage(" Zona Única "),
        played("3", "B", "C", "2026-03-15", 80, 60),
    ];
    let groups = all(&matches);
    assert_eq!(groups[0].sub_groups.len(), 1);
    assert_eq!(groups[0].sub_groups[0].label, None);
    assert_eq!(groups[0].sub_groups[0].entries.len(), 3);
}

#[test]
fn knockout_rounds_in_bracket_order() {
    let matches = vec![
        played("f", "A", "C", "2026-04-20", 60, 50).with_stage("Final"),
        played("s", "A", "D", "2026-04-10", 60, 50).with_stage("Semifinal"),
        played("q", "A", "E", "2026-04-01", 60, 50).with_stage("Cuartos de Final"),
        played("o", "A", "F", "2026-03-25", 60, 50).with_stage("Octavos"),
    ];
    let groups = all(&matches);
    assert!(groups[0].sub_groups.is_empty());
    let rounds: Vec<_> = groups[0].bracket_rounds.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(rounds, ["Octavos", "Cuartos de Final", "Semifinal", "Final"]);
}

#[test]
fn differently_written_semifinals_stay_separate_rounds() {
    let matches = vec![
        played("1", "A", "B", "2026-04-10", 60, 50).with_stage("Semi 1"),
        played("2", "C", "D", "2026-04-10", 60, 50).with_stage("Final"),
        played("3", "E", "F", "2026-04-10", 60, 50).with_stage("Semifinales"),
    ];
    let groups = all(&matches);
    let rounds: Vec<_> = groups[0].bracket_rounds.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(rounds, ["Semi 1", "Semifinales", "Final"]);
}

#[test]
fn bracket_matches_sorted_by_date_then_time_and_pending_kept() {
    let matches = vec![
        Match::new("late", "Liga", "A", "B").on("2026-04-10", "21:30").with_stage("Semifinal"),
        Match::new("early", "Liga", "C", "D")
            .on("2026-04-10", "19:00")
            .with_stage("Semifinal")
            .with_score(55, 61),
        Match::new("first", "Liga", "E", "F").on("2026-04-09", "22:00").with_stage("Semifinal"),
    ];
    let groups = all(&matches);
    assert!(groups[0].sub_groups.is_empty());
    let round = &groups[0].bracket_rounds[0];
    let ids: Vec<_> = round.matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["first", "early", "late"]);

    assert_eq!(round.matches[1].winner(), Some(Side::Away));
    assert_eq!(round.matches[2].score_home, None);
    assert_eq!(round.matches[2].winner(), None);
}

#[test]
fn filters_select_competition_and_category() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 10, 8).with_category("U17"),
        played("2", "C", "D", "2026-03-01", 10, 8).with_category("Primera"),
        played("3", "E", "F", "2026-03-01", 10, 8),
        Match::new("4", "Copa", "A", "B")
            .on("2026-03-01", "20:00")
            .with_category("U17")
            .with_score(1, 0),
    ];

    let u17 = compute_standings(&matches, &StandingsFilter::new("Todos", "U17"));
    assert_eq!(u17.len(), 2);
    assert_eq!(teams(&u17[0].sub_groups[0].entries), ["A", "B"]);

    let liga = compute_standings(&matches, &StandingsFilter::new("Liga", "Todas"));
    assert_eq!(liga.len(), 1);
    assert_eq!(liga[0].sub_groups[0].entries.len(), 6);

    let none = compute_standings(&matches, &StandingsFilter::new("Liga", "Mayores"));
    assert!(none.is_empty());
}

#[test]
fn selection_parsing() {
    assert_eq!(Selection::parse("Todos"), Selection::All);
    assert_eq!(Selection::parse("todas"), Selection::All);
    assert_eq!(Selection::parse(" "), Selection::All);
    assert_eq!(Selection::from(None::<&str>), Selection::All);
    assert_eq!(Selection::parse("Apertura"), Selection::Only("Apertura".to_string()));
}

#[test]
fn selector_options_are_sorted_and_distinct() {
    let matches = vec![
        Match::new("1", "Clausura", "A", "B").with_category("U17"),
        Match::new("2", "Apertura", "A", "B").with_category("Primera"),
        Match::new("3", "Apertura", "A", "B").with_category("U15"),
        Match::new("4", "", "A", "B").with_category("U15"),
        Match::new("5", "Apertura", "A", "B"),
    ];
    assert_eq!(available_competitions(&matches), ["Apertura", "Clausura"]);
    assert_eq!(
        available_categories(&matches, &Selection::parse("Apertura")),
        ["Primera", "U15"]
    );
    assert_eq!(
        available_categories(&matches, &Selection::All),
        ["Primera", "U15", "U17"]
    );
}

#[test]
fn pending_group_keeps_its_table_next_to_played_group() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 10, 8).with_stage("Grupo A"),
        Match::new("2", "Liga", "C", "D")
            .on("2026-03-01", "21:00")
            .with_stage("Grupo B"),
    ];
    let groups = all(&matches);
    let labels: Vec<_> = groups[0].sub_groups.iter().map(|s| s.label.as_deref()).collect();
    assert_eq!(labels, [Some("Grupo A"), Some("Grupo B")]);
    assert_eq!(teams(&groups[0].sub_groups[0].entries), ["A", "B"]);
    assert!(groups[0].sub_groups[1].entries.is_empty());
}

#[test]
fn competition_with_only_pending_groups_is_dropped() {
    let matches = vec![
        Match::new("1", "Copa", "A", "B").on("2026-03-01", "20:00").with_stage("Grupo A"),
        Match::new("2", "Copa", "C", "D").on("2026-03-01", "21:00").with_stage("Grupo B"),
    ];
    assert!(all(&matches).is_empty());
}

#[test]
fn huge_scores_do_not_overflow_totals() {
    let matches = vec![
        played("1", "A", "B", "2026-03-01", 4_000_000_000, 0),
        played("2", "A", "C", "2026-03-08", 4_000_000_000, 1),
        played("3", "D", "A", "2026-03-15", u32::MAX, 3),
    ];
    let groups = all(&matches);
    let entries = &groups[0].sub_groups[0].entries;
    let a = entry(entries, "A");
    assert_eq!(a.played, 3);
    assert_eq!(a.points_for, 8_000_000_003);
    assert_eq!(a.points_against, u64::from(u32::MAX) + 1);
    assert_eq!(a.diff, 8_000_000_003 - (i64::from(u32::MAX) + 1));
    assert_eq!(a.points, 5);
}

#[test]
fn unnamed_bucket_name_works_as_filter() {
    let matches = vec![
        Match::new("1", "", "A", "B").on("2026-03-01", "20:00").with_score(3, 1),
        played("2", "C", "D", "2026-03-01", 10, 8),
    ];
    let groups = compute_standings(&matches, &StandingsFilter::new("Sin torneo", "Todas"));
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].competition, "Sin torneo");
    assert_eq!(teams(&groups[0].sub_groups[0].entries), ["A", "B"]);
    assert_eq!(
        available_categories(
            &[Match::new("3", "", "A", "B").with_category("U15")],
            &Selection::parse("Sin torneo")
        ),
        ["U15"]
    );
}
