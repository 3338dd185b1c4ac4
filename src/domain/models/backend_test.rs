use anyhow::Result;

use super::styled_image_prompt;
use super::PlanPrompt;
use crate::domain::models::SceneCount;

#[test]
fn it_builds_fresh_plan_prompts() -> Result<()> {
    let prompt = PlanPrompt::new("A lone wanderer finds a garden", SceneCount::new(3)?, 0);
    let instruction = prompt.system_instruction();

    assert!(!prompt.is_continuation());
    assert!(instruction.contains("Generate exactly 3 image scenes based on the story."));
    assert!(!instruction.contains("MORE scenes"));
    assert!(instruction.contains("\"scenes\": an array of strings"));
    assert!(instruction.contains("\"thumbnail\": a single string"));
    insta::assert_snapshot!(prompt.contents(), @r###"
    Story: A lone wanderer finds a garden
    Generate 3 scenes.
    "###);

    return Ok(());
}

#[test]
fn it_builds_continuation_plan_prompts() -> Result<()> {
    let prompt = PlanPrompt::new("A lone wanderer finds a garden", SceneCount::new(2)?, 3);
    let instruction = prompt.system_instruction();

    assert!(prompt.is_continuation());
    assert!(instruction.contains(
        "Note: You are adding 2 MORE scenes to an existing set of 3 scenes."
    ));

    return Ok(());
}

#[test]
fn it_appends_the_style_suffix() {
    insta::assert_snapshot!(
        styled_image_prompt("A garden at dusk"),
        @"A garden at dusk, cinematic high-end photography, 8k resolution, ultra detailed"
    );
}

#[test]
fn it_trims_trailing_whitespace_before_styling() {
    assert_eq!(
        styled_image_prompt("A garden at dusk  \n"),
        "A garden at dusk, cinematic high-end photography, 8k resolution, ultra detailed"
    );
}
