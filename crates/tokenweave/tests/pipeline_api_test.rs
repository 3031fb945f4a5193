//! Integration tests for the Pipeline API
//!
//! These tests build complete token trees in temporary directories and check
//! the per-theme outcomes and the written files.

use std::{fs, path::Path};

use tempfile::TempDir;

use tokenweave::{
    BuildStatus, Pipeline, Platform,
    config::{AppConfig, SourceConfig},
    theme::Theme,
};
use tokenweave_parser::error::{ErrorCode, Severity};

const RAW_COLORS: &str = r##"{
    "blue": { "500": { "value": "#2196F3" }, "50": { "value": "#E3F2FD" } },
    "black": { "value": "#000000" },
    "white": { "value": "#FFFFFF", "description": "Pure white" }
}"##;

const FOUNDATION: &str = r#"{
    "fontSize": { "foundation": { "base": { "value": "16px" } } },
    "fontWeight": { "bold": { "value": 700 } },
    "fontFamily": { "body": { "value": "Inter" } },
    "lineHeight": { "body": { "value": 1.5 } },
    "size": { "spacing": { "md": { "value": "8px" } } }
}"#;

const BUTTON: &str = r#"{
    "button": {
        "background": { "value": "{color.primary}" },
        "padding": { "value": "{size.spacing.md}" }
    }
}"#;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn theme_file(background: &str) -> String {
    format!(
        r#"{{
    "color": {{
        "background": {{ "value": "{{color.rawColors.{background}}}" }},
        "primary": {{ "value": "{{color.rawColors.blue.500}}" }}
    }}
}}"#
    )
}

/// Writes a complete token tree, skipping the listed themes.
fn token_tree(skip: &[Theme]) -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "raw/colors.json", RAW_COLORS);
    write(dir.path(), "core/foundation.json", FOUNDATION);
    write(dir.path(), "components/button.json", BUTTON);

    for theme in Theme::ALL {
        if skip.contains(&theme) {
            continue;
        }
        let background = match theme.mode().as_str() {
            "dark" => "black",
            _ => "white",
        };
        write(dir.path(), &format!("themes/{theme}.json"), &theme_file(background));
    }
    dir
}

fn config(input: &Path, output: &Path) -> AppConfig {
    AppConfig::default()
        .with_input_directory(input)
        .with_output_directory(output)
        .with_sources(vec![
            SourceConfig::new("raw/colors.json", true).with_prefix("color.rawColors"),
            SourceConfig::new("core/**/*.json", false),
            SourceConfig::new("themes/{theme}.json", true),
            SourceConfig::new("components/**/*.json", false),
        ])
}

fn read(output: &Path, relative: &str) -> String {
    fs::read_to_string(output.join(relative))
        .unwrap_or_else(|err| panic!("failed to read {relative}: {err}"))
}

#[test]
fn test_pipeline_api_exists() {
    let _pipeline = Pipeline::default();
}

#[test]
fn test_full_build_succeeds() {
    let input = token_tree(&[]);
    let output = TempDir::new().unwrap();

    let pipeline = Pipeline::new(config(input.path(), output.path()));
    let report = pipeline.run().expect("Failed to run pipeline");

    assert_eq!(report.status(), BuildStatus::Success);
    assert_eq!(report.succeeded(), Theme::ALL);
    assert!(report.failures().is_empty());

    let css = read(output.path(), "css/tokens.css");
    assert_eq!(css.matches("--blue-500: #2196F3;").count(), 1, "{css}");
    assert!(css.contains(":root,\n[data-theme=\"classic-light\"] {"), "{css}");
    for theme in ["classic-dark", "advance-light", "advance-dark"] {
        assert!(css.contains(&format!("[data-theme=\"{theme}\"] {{")), "{css}");
    }
    assert!(css.contains("--button-background: var(--color-primary);"), "{css}");
    assert!(css.contains("--color-primary: var(--blue-500);"), "{css}");

    for file in [
        "android/colors.xml",
        "android/colors_classic_dark.xml",
        "android/colors_advance_light.xml",
        "android/colors_advance_dark.xml",
        "android/dimens.xml",
        "android/font_dimens.xml",
        "ios/DesignTokens.swift",
        "ios/DesignTokensClassicDark.swift",
        "ios/DesignTokensAdvanceLight.swift",
        "ios/DesignTokensAdvanceDark.swift",
        "json/tokens.json",
    ] {
        assert!(output.path().join(file).is_file(), "missing {file}");
    }
}

#[test]
fn test_theme_values_differ_per_theme() {
    let input = token_tree(&[]);
    let output = TempDir::new().unwrap();

    Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    let light = read(output.path(), "android/colors.xml");
    let dark = read(output.path(), "android/colors_classic_dark.xml");
    assert!(light.contains(r#"<color name="color_background">#FFFFFFFF</color>"#), "{light}");
    assert!(dark.contains(r#"<color name="color_background">#FF000000</color>"#), "{dark}");
    assert!(dark.contains(r#"<color name="button_background">#FF2196F3</color>"#), "{dark}");

    let swift = read(output.path(), "ios/DesignTokensAdvanceDark.swift");
    assert!(swift.contains("public struct DesignTokensAdvanceDark {"));
    assert!(
        swift.contains(
            "public static let colorBackground: UIColor = \
             UIColor(red: 0.0, green: 0.0, blue: 0.0, alpha: 1.0)"
        ),
        "{swift}"
    );
    assert!(swift.contains("    /// Pure white\n"), "{swift}");
}

#[test]
fn test_font_size_becomes_sp() {
    let input = token_tree(&[]);
    let output = TempDir::new().unwrap();

    Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    let fonts = read(output.path(), "android/font_dimens.xml");
    assert!(fonts.contains(r#"<dimen name="fontsize_foundation_base">16sp</dimen>"#), "{fonts}");
    assert!(fonts.contains(r#"<integer name="fontweight_bold">700</integer>"#), "{fonts}");

    let dimens = read(output.path(), "android/dimens.xml");
    assert!(dimens.contains(r#"<dimen name="size_spacing_md">8dp</dimen>"#), "{dimens}");
    assert!(
        dimens.contains(r#"<item name="lineheight_body" format="float" type="dimen">1.5</item>"#),
        "{dimens}"
    );
}

#[test]
fn test_component_tokens_reach_android() {
    let input = token_tree(&[]);
    let output = TempDir::new().unwrap();

    Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    let colors = read(output.path(), "android/colors.xml");
    assert!(colors.contains(r#"<color name="button_background">#FF2196F3</color>"#), "{colors}");
    assert!(!colors.contains("button_padding"), "{colors}");

    let dimens = read(output.path(), "android/dimens.xml");
    assert!(dimens.contains(r#"<dimen name="button_padding">8dp</dimen>"#), "{dimens}");
}

#[test]
fn test_missing_theme_is_partial() {
    let input = token_tree(&[Theme::ClassicDark]);
    let output = TempDir::new().unwrap();

    let report = Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    assert_eq!(report.status(), BuildStatus::Partial);
    assert_eq!(report.failed(), [Theme::ClassicDark]);
    assert_eq!(
        report.succeeded(),
        [Theme::ClassicLight, Theme::AdvanceLight, Theme::AdvanceDark]
    );

    let failure = report.failure_for(Theme::ClassicDark).unwrap();
    assert!(failure.error().to_string().contains("classic-dark"), "{}", failure.error());

    let css = read(output.path(), "css/tokens.css");
    assert!(!css.contains("[data-theme=\"classic-dark\"]"), "{css}");
    assert!(css.contains("[data-theme=\"classic-light\"]"));
    assert!(css.contains("[data-theme=\"advance-light\"]"));
    assert!(css.contains("[data-theme=\"advance-dark\"]"));

    assert!(!output.path().join("android/colors_classic_dark.xml").exists());
    assert!(!output.path().join("ios/DesignTokensClassicDark.swift").exists());
    assert!(output.path().join("android/colors.xml").exists());
}

#[test]
fn test_failed_theme_outputs_are_removed() {
    let input = token_tree(&[]);
    let output = TempDir::new().unwrap();
    let pipeline = Pipeline::new(config(input.path(), output.path()));

    pipeline.run().expect("Failed to run pipeline");
    assert!(output.path().join("android/colors_classic_dark.xml").exists());
    assert!(output.path().join("ios/DesignTokensClassicDark.swift").exists());

    fs::remove_file(input.path().join("themes/classic-dark.json")).unwrap();
    let report = pipeline.run().expect("Failed to run pipeline");

    assert_eq!(report.failed(), [Theme::ClassicDark]);
    assert!(!output.path().join("android/colors_classic_dark.xml").exists());
    assert!(!output.path().join("ios/DesignTokensClassicDark.swift").exists());
    assert!(output.path().join("android/colors_advance_dark.xml").exists());
    assert!(output.path().join("ios/DesignTokensAdvanceDark.swift").exists());
}

#[test]
fn test_missing_default_theme_moves_root() {
    let input = token_tree(&[Theme::ClassicLight]);
    let output = TempDir::new().unwrap();

    let report = Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    assert_eq!(report.status(), BuildStatus::Partial);

    let css = read(output.path(), "css/tokens.css");
    assert_eq!(css.matches("--blue-500: #2196F3;").count(), 1, "{css}");
    assert!(!css.contains(":root,\n"), "{css}");
    assert!(output.path().join("android/dimens.xml").exists());
    assert!(!output.path().join("android/colors.xml").exists());
}

#[test]
fn test_every_theme_missing_fails() {
    let input = token_tree(&Theme::ALL);
    let output = TempDir::new().unwrap();

    let report = Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    assert_eq!(report.status(), BuildStatus::Failed);
    assert_eq!(report.failures().len(), 4);
    assert!(!output.path().join("css").exists());
}

#[test]
fn test_unresolved_reference_degrades() {
    let input = token_tree(&[]);
    write(
        input.path(),
        "themes/advance-light.json",
        r#"{ "color": { "background": { "value": "{color.rawColors.missing}" } } }"#,
    );
    let output = TempDir::new().unwrap();

    let report = Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    assert_eq!(report.status(), BuildStatus::Partial);
    assert!(report.failures().is_empty());

    let build = report.build_for(Theme::AdvanceLight).unwrap();
    let diagnostics = build.diagnostics();
    assert!(
        diagnostics
            .iter()
            .any(|d| d.token().map(ToString::to_string).as_deref() == Some("color.background")),
        "{diagnostics:?}"
    );

    let css = read(output.path(), "css/tokens.css");
    assert!(css.contains("--color-background: {color.rawColors.missing};"), "{css}");
}

#[test]
fn test_strict_mode_fails_theme() {
    let input = token_tree(&[]);
    write(
        input.path(),
        "themes/advance-light.json",
        r##"{
            "color": {
                "a": { "value": "{color.b}" },
                "b": { "value": "{color.a}" },
                "primary": { "value": "#2196F3" }
            }
        }"##,
    );
    let output = TempDir::new().unwrap();

    let report = Pipeline::new(config(input.path(), output.path()).with_strict(true))
        .run()
        .expect("Failed to run pipeline");

    assert_eq!(report.status(), BuildStatus::Partial);
    assert_eq!(report.failed(), [Theme::AdvanceLight]);
    let message = report.failure_for(Theme::AdvanceLight).unwrap().error().to_string();
    assert!(message.contains("circular reference"), "{message}");
    assert!(!output.path().join("ios/DesignTokensAdvanceLight.swift").exists());
}

#[test]
fn test_strict_mode_fails_on_malformed_token() {
    let input = token_tree(&[]);
    write(
        input.path(),
        "themes/advance-dark.json",
        r##"{
            "color": {
                "background": { "value": "#000000" },
                "primary": { "value": "#2196F3" },
                "border": { "value": null }
            }
        }"##,
    );
    let output = TempDir::new().unwrap();

    let lenient = Pipeline::new(config(input.path(), output.path())).build();
    let build = lenient.build_for(Theme::AdvanceDark).unwrap();
    let diagnostics = build.diagnostics();
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code(), Some(ErrorCode::E100));
    assert_eq!(diagnostics[0].severity(), Severity::Warning);

    let strict = Pipeline::new(config(input.path(), output.path()).with_strict(true)).build();
    assert_eq!(strict.failed(), [Theme::AdvanceDark]);
}

#[test]
fn test_name_collision_is_partial() {
    let input = token_tree(&[]);
    write(
        input.path(),
        "components/badge.json",
        r##"{
            "badge": {
                "primary-hover": { "value": "#000000" },
                "primary_hover": { "value": "#FFFFFF" }
            }
        }"##,
    );
    let output = TempDir::new().unwrap();

    let report = Pipeline::new(config(input.path(), output.path()))
        .run()
        .expect("Failed to run pipeline");

    assert_eq!(report.status(), BuildStatus::Partial);
    assert!(report.failures().is_empty());

    let build = report.build_for(Theme::ClassicLight).unwrap();
    let collisions: Vec<_> = build
        .diagnostics()
        .into_iter()
        .filter(|d| d.code() == Some(ErrorCode::E300))
        .collect();
    // Both Android and iOS generate the same identifier for the two tokens.
    assert_eq!(collisions.len(), 2, "{collisions:?}");
    for collision in &collisions {
        assert_eq!(
            collision.token().map(ToString::to_string).as_deref(),
            Some("badge.primary_hover")
        );
    }
    assert!(collisions[0].message().contains("android/colors.xml"), "{collisions:?}");

    let colors = read(output.path(), "android/colors.xml");
    assert_eq!(colors.matches(r#"name="badge_primary_hover""#).count(), 1, "{colors}");
    assert!(colors.contains(r#"<color name="badge_primary_hover">#FF000000</color>"#), "{colors}");
}

#[test]
fn test_platform_selection() {
    let input = token_tree(&[]);
    let output = TempDir::new().unwrap();

    let config = config(input.path(), output.path()).with_platforms(vec![Platform::Json]);
    let written = {
        let pipeline = Pipeline::new(config);
        let report = pipeline.build();
        pipeline.write_outputs(&report).expect("Failed to write outputs")
    };

    assert_eq!(written, [output.path().join("json/tokens.json")]);
    assert!(!output.path().join("css").exists());

    let json: serde_json::Value =
        serde_json::from_str(&read(output.path(), "json/tokens.json")).unwrap();
    assert_eq!(json["classic-dark"]["color"]["background"], "#000000");
    assert_eq!(json["classic-light"]["fontWeight"]["bold"], 700);
}

#[test]
fn test_pipeline_reusability() {
    let input = token_tree(&[]);
    let output = TempDir::new().unwrap();

    let pipeline = Pipeline::new(config(input.path(), output.path()));
    let first = pipeline.build();
    let second = pipeline.build();

    assert_eq!(first.succeeded(), second.succeeded());
    assert_eq!(pipeline.render(&first).unwrap(), pipeline.render(&second).unwrap());
}
