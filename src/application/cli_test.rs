use anyhow::Result;

use super::build;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_requires_a_story_source_for_plans() {
    assert!(build().try_get_matches_from(vec!["storyreel", "plan"]).is_err());
    assert!(build()
        .try_get_matches_from(vec!["storyreel", "plan", "-s", "A tale", "-f", "story.txt"])
        .is_err());
}

#[test]
fn it_parses_plan_arguments() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "storyreel",
        "plan",
        "--story",
        "A tale",
        "--scene-count",
        "4",
    ])?;

    let (name, plan_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "plan");
    assert_eq!(plan_matches.get_one::<String>("story").unwrap(), "A tale");
    assert_eq!(plan_matches.get_one::<String>("scene-count").unwrap(), "4");

    return Ok(());
}

#[test]
fn it_rejects_unknown_aspect_ratios() {
    assert!(build()
        .try_get_matches_from(vec!["storyreel", "--aspect-ratio", "21:9"])
        .is_err());
}
