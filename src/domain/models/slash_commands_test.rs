use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse(" ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    assert!(SlashCommand::parse("!q").is_none());
}

#[test]
fn it_parse_story_text() {
    assert!(SlashCommand::parse("Once upon a time /g").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q");
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    for text in ["/q", "/quit", "/exit"] {
        assert!(SlashCommand::parse(text).unwrap().is_quit());
    }
    assert!(!SlashCommand::parse("/g").unwrap().is_quit());
}

#[test]
fn it_is_generate() {
    assert!(SlashCommand::parse("/g").unwrap().is_generate());
    assert!(SlashCommand::parse("/generate").unwrap().is_generate());
    assert!(!SlashCommand::parse("/m").unwrap().is_generate());
}

#[test]
fn it_is_add_more() {
    assert!(SlashCommand::parse("/m").unwrap().is_add_more());
    assert!(SlashCommand::parse("/more").unwrap().is_add_more());
}

#[test]
fn it_is_image_with_index() {
    let cmd = SlashCommand::parse("/image 3").unwrap();
    assert!(cmd.is_image());
    assert_eq!(cmd.first_arg(), Some("3"));
}

#[test]
fn it_is_thumbnail() {
    assert!(SlashCommand::parse("/t").unwrap().is_thumbnail());
    assert!(SlashCommand::parse("/thumbnail").unwrap().is_thumbnail());
}

#[test]
fn it_is_aspect_ratio() {
    let cmd = SlashCommand::parse("/ratio 9:16").unwrap();
    assert!(cmd.is_aspect_ratio());
    assert_eq!(cmd.first_arg(), Some("9:16"));
}

#[test]
fn it_is_scene_count() {
    let cmd = SlashCommand::parse("/n 5").unwrap();
    assert!(cmd.is_scene_count());
    assert_eq!(cmd.first_arg(), Some("5"));
}

#[test]
fn it_is_story_with_text() {
    let cmd = SlashCommand::parse("/story  A lone   wanderer").unwrap();
    assert!(cmd.is_story());
    assert_eq!(cmd.rest(), "A lone wanderer");
}

#[test]
fn it_is_story_without_text() {
    let cmd = SlashCommand::parse("/s").unwrap();
    assert!(cmd.is_story());
    assert_eq!(cmd.rest(), "");
    assert!(cmd.first_arg().is_none());
}

#[test]
fn it_is_copy_and_save() {
    assert!(SlashCommand::parse("/c all").unwrap().is_copy());
    assert!(SlashCommand::parse("/copy 1").unwrap().is_copy());
    assert!(SlashCommand::parse("/w thumbnail").unwrap().is_save());
    assert!(SlashCommand::parse("/save 2").unwrap().is_save());
}

#[test]
fn it_is_list_help_and_key() {
    assert!(SlashCommand::parse("/l").unwrap().is_list());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
    assert!(SlashCommand::parse("/key abc").unwrap().is_key());
}
