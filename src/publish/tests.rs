// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::sync::Arc;

use super::html_preset::render_preset;
use super::swifty::{SwiftyRepo, SwiftyServer};
use super::*;
use crate::config::types::PublishedFileId;
use crate::tools::test_utils::run_with_logs;

fn mods() -> Vec<ModDescriptor> {
    vec![
        ModDescriptor::new("CBA_A3", PublishedFileId::new(450_814_997)).unwrap(),
        ModDescriptor::new("Tom & Jerry <RHS>", PublishedFileId::new(42)).unwrap(),
    ]
}

fn config(root: &Path, extra: &str) -> Config {
    Config::parse(&format!(
        r#"
[steam]
api_key = "k"

[paths]
steamcmd = "{root}/steamcmd"
install = "{root}/arma3"
mods = "{root}/mods"
{extra}
"#,
        root = root.display()
    ))
    .unwrap()
}

#[test]
fn test_publisher_order() {
    let names: Vec<_> = publishers().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["arma3sync", "html_preset", "swifty"]);
}

#[test]
fn test_publishers_disabled_by_default() {
    let config = config(Path::new("/srv"), "");
    assert!(publishers().iter().all(|p| !p.enabled(&config)));
}

#[test]
fn test_render_preset_escapes_names() {
    let html = render_preset("Main <Ops>", &mods()).unwrap();

    assert!(html.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(html.contains(r#"<meta name="arma:Type" content="Modpack" />"#));
    assert!(html.contains(r#"<meta name="arma:PresetName" content="Main &lt;Ops&gt;" />"#));
    assert!(html.contains(r#"<td data-type="DisplayName">CBA_A3</td>"#));
    assert!(html.contains(r#"<td data-type="DisplayName">Tom &amp; Jerry &lt;RHS&gt;</td>"#));
    assert!(!html.contains("<RHS>"));
    assert!(html.contains(
        r#"<a href="https://steamcommunity.com/sharedfiles/filedetails/?id=450814997" data-type="Link">"#
    ));
    assert_eq!(html.matches(r#"data-type="ModContainer""#).count(), 2);
}

#[test]
fn test_render_preset_without_mods() {
    let html = render_preset("Empty", &[]).unwrap();
    assert!(!html.contains("ModContainer"));
    assert!(html.contains("</table>"));
}

#[tokio::test]
async fn test_html_preset_written() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("www/preset.html");
    let config = config(
        temp.path(),
        &format!(
            "\n[html_preset]\nactive = true\npath = \"{}\"\nname = \"Main\"\n",
            path.display()
        ),
    );
    let ctx = ToolContext::new(Arc::new(config), false);

    publish_all(&ctx, &mods()).await.unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches("ModContainer").count(), 2);
}

#[tokio::test]
async fn test_html_preset_dry_run_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("preset.html");
    let config = config(
        temp.path(),
        &format!(
            "\n[html_preset]\nactive = true\npath = \"{}\"\nname = \"Main\"\n",
            path.display()
        ),
    );
    let ctx = ToolContext::new(Arc::new(config), true);

    let (result, logs) = run_with_logs(|| async { publish_all(&ctx, &mods()).await }).await;

    result.unwrap();
    assert!(logs.contains("[dry-run] Would write launcher preset"));
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_arma3sync_command() {
    let config = config(
        Path::new("/srv"),
        "\n[a3sync]\nactive = true\njar = \"/opt/ArmA3Sync/ArmA3Sync.jar\"\nrepo_name = \"main\"\ndirectory = \"/srv/a3sync\"\n",
    );
    let cmd = Arma3SyncPublisher::build_command(&config).unwrap();
    insta::assert_snapshot!(cmd.command_line(), @"java -jar /opt/ArmA3Sync/ArmA3Sync.jar -build main");
}

#[tokio::test]
async fn test_arma3sync_dry_run() {
    let temp = tempfile::tempdir().unwrap();
    let directory = temp.path().join("a3sync");
    std::fs::create_dir_all(directory.join("@old")).unwrap();
    let config = config(
        temp.path(),
        &format!(
            "\n[a3sync]\nactive = true\njar = \"/opt/a3s.jar\"\nrepo_name = \"main\"\ndirectory = \"{}\"\n",
            directory.display()
        ),
    );
    let ctx = ToolContext::new(Arc::new(config), true);

    let (result, logs) = run_with_logs(|| async { publish_all(&ctx, &mods()).await }).await;

    result.unwrap();
    assert!(directory.join("@old").exists());
    assert_eq!(logs.matches("[dry-run] Would mirror mod").count(), 2);
    assert!(logs.contains("@cba_a3"));
    assert!(logs.contains("-build main"));
}

#[cfg(not(windows))]
#[test]
fn test_swifty_command_uses_mono() {
    let config = config(
        Path::new("/srv"),
        "\n[swifty]\nactive = true\ncli = \"/opt/swifty/swifty-cli.exe\"\nrepo_json = \"/srv/swifty/repo.json\"\noutput = \"/srv/www/swifty\"\n",
    );
    let cmd = SwiftyPublisher::build_command(&config).unwrap();
    insta::assert_snapshot!(cmd.command_line(), @"mono /opt/swifty/swifty-cli.exe create /srv/swifty/repo.json /srv/www/swifty");
}

#[test]
fn test_swifty_repo_json_keys() {
    let mut repo = SwiftyRepo::new("Main", "/srv/mods/swifty");
    repo.servers.push(SwiftyServer {
        name: "Main".to_string(),
        address: "arma.example.org".to_string(),
        port: 2302,
        password: String::new(),
        battle_eye: true,
    });
    let json: serde_json::Value = serde_json::from_str(&repo.to_json().unwrap()).unwrap();

    assert_eq!(json["repoName"], "Main");
    assert_eq!(json["basePath"], "/srv/mods/swifty");
    assert_eq!(json["clientParameters"], "-skipIntro");
    assert_eq!(json["repoBasicAuthentication"]["username"], "");
    assert_eq!(json["requiredMods"][0]["modName"], "@*");
    assert_eq!(json["optionalMods"][0]["modName"], "optional/@*");
    assert_eq!(json["optionalMods"][0]["enabled"], false);
    assert_eq!(json["servers"][0]["battleEye"], true);
    assert_eq!(json["servers"][0]["port"], 2302);
}

#[tokio::test]
async fn test_swifty_repo_load() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("repo.json");
    let repo = SwiftyRepo::new("Main", temp.path().join("swifty"));
    std::fs::write(&path, repo.to_json().unwrap()).unwrap();

    assert_eq!(SwiftyRepo::load(&path).await.unwrap(), repo);
    assert!(SwiftyRepo::load(&temp.path().join("missing.json")).await.is_err());
}

#[tokio::test]
async fn test_swifty_dry_run_keeps_repository() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("swifty");
    let output = temp.path().join("out");
    let repo_json = temp.path().join("repo.json");
    std::fs::create_dir_all(base.join("optional/@old")).unwrap();
    std::fs::create_dir_all(output.join("stale")).unwrap();
    std::fs::write(
        &repo_json,
        SwiftyRepo::new("Main", &base).to_json().unwrap(),
    )
    .unwrap();
    let config = config(
        temp.path(),
        &format!(
            "\n[swifty]\nactive = true\ncli = \"/opt/swifty-cli.exe\"\nrepo_json = \"{}\"\noutput = \"{}\"\n",
            repo_json.display(),
            output.display()
        ),
    );
    let ctx = ToolContext::new(Arc::new(config), true);

    let (result, logs) = run_with_logs(|| async { publish_all(&ctx, &mods()).await }).await;

    result.unwrap();
    assert!(base.join("optional/@old").exists());
    assert!(output.join("stale").exists());
    assert!(logs.contains("[dry-run] Would clear Swifty repository"));
    assert!(logs.contains("[dry-run] Would build Swifty repository"));
    assert!(logs.contains("create"));
}
