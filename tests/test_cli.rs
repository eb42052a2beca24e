use biteboard::application::SortMode;
use biteboard::cli::args::{Args, Command};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["biteboard", "-v"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_bare_list_command_when_parsing_then_uses_default_query() {
    // Arrange
    let args = vec!["biteboard", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { query, json } => {
            assert_eq!(query.search, "");
            assert_eq!(query.cuisine, "all");
            assert_eq!(query.sort, SortMode::RatingDesc);
            assert!(!json);
        }
        _ => panic!("Expected List command"),
    }
    assert_eq!(parsed.config, None);
    assert_eq!(parsed.storage, None);
}

#[test]
fn given_list_options_when_parsing_then_captures_them() {
    // Arrange
    let args = vec![
        "biteboard", "list", "--search", "taco", "--cuisine", "Mexican", "--sort", "newest",
        "--json",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { query, json } => {
            assert_eq!(query.search, "taco");
            assert_eq!(query.cuisine, "Mexican");
            assert_eq!(query.sort, SortMode::Newest);
            assert!(json);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn given_unknown_sort_mode_when_parsing_then_fails() {
    // Arrange
    let args = vec!["biteboard", "list", "--sort", "alphabetical"];

    // Act & Assert
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_global_flags_after_subcommand_when_parsing_then_succeeds() {
    // Arrange
    let args = vec![
        "biteboard",
        "stats",
        "-c",
        "/tmp/biteboard.toml",
        "-s",
        "/tmp/storage.json",
        "-vv",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::Stats { json: false }));
    assert_eq!(parsed.config, Some(PathBuf::from("/tmp/biteboard.toml")));
    assert_eq!(parsed.storage, Some(PathBuf::from("/tmp/storage.json")));
    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_partial_add_command_when_parsing_then_missing_fields_are_none() {
    // Arrange
    let args = vec!["biteboard", "add", "--restaurant", "Pho Real", "--rating", "4"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Add {
            restaurant,
            dish,
            rating,
            reviewer,
            ..
        } => {
            assert_eq!(restaurant.as_deref(), Some("Pho Real"));
            assert_eq!(rating.as_deref(), Some("4"));
            assert_eq!(dish, None);
            assert_eq!(reviewer, None);
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn given_render_command_with_output_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["biteboard", "render", "--cuisine", "Thai", "-o", "site/index.html", "--open"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Render {
            query,
            output,
            open,
        } => {
            assert_eq!(query.cuisine, "Thai");
            assert_eq!(output, Some(PathBuf::from("site/index.html")));
            assert!(open);
        }
        _ => panic!("Expected Render command"),
    }
}

#[test]
fn given_dishes_command_with_data_path_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["biteboard", "dishes", "public/dishes.json"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Dishes { data, output, open } => {
            assert_eq!(data, Some(PathBuf::from("public/dishes.json")));
            assert_eq!(output, None);
            assert!(!open);
        }
        _ => panic!("Expected Dishes command"),
    }
}

#[test]
fn given_images_and_validate_commands_when_parsing_then_succeed() {
    // Act
    let images = Args::try_parse_from(["biteboard", "images", "--force"]).unwrap();
    let validate = Args::try_parse_from(["biteboard", "validate"]).unwrap();

    // Assert
    assert!(matches!(images.command, Command::Images { force: true }));
    assert!(matches!(validate.command, Command::Validate { dir: None }));
}
