//! Replay a call script against a fresh registry and print the outcomes.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use social_music::domain::RegistryService;
use social_music::domain::ports::NotificationSink;
use social_music::inbound::script::{self, RegistrySummary};
use social_music::outbound::notifications::{
    BroadcastNotificationSink, FanoutNotificationSink, TracingNotificationSink,
};
use social_music::{RegistrySettings, telemetry};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::info;

/// `registry-replay` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "registry-replay",
    about = "Replay a JSON call script against an empty social music registry",
    version
)]
struct CliArgs {
    /// Path to a JSON call script. Reads standard input when omitted.
    #[arg(long = "script", value_name = "path")]
    script: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    telemetry::init();
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = RegistrySettings::load_from_iter([OsString::from("registry-replay")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;

    run(&args, &settings, io::stdin().lock(), io::stdout().lock())
}

/// Replay the script named by `args`, or read from `input` when no path is
/// given, and write one JSON outcome line per call followed by a summary
/// line.
fn run(
    args: &CliArgs,
    settings: &RegistrySettings,
    input: impl Read,
    mut output: impl Write,
) -> io::Result<()> {
    let calls = match args.script.as_deref() {
        Some(path) => script::load_script(path),
        None => script::read_script(input, Path::new("-")),
    }
    .map_err(io::Error::other)?;

    let bus = Arc::new(BroadcastNotificationSink::new(
        settings.notification_capacity(),
    ));
    let sink = FanoutNotificationSink::default()
        .with_sink(Arc::new(TracingNotificationSink))
        .with_sink(Arc::clone(&bus) as Arc<dyn NotificationSink>);
    let service = RegistryService::new(settings.build_registry(), Arc::new(sink));
    let mut observer = bus.subscribe();

    let outcomes = script::replay(&service, calls);
    let committed = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    info!(
        calls = outcomes.len(),
        committed,
        rejected = outcomes.len() - committed,
        follow_policy = ?settings.follow_policy(),
        "replay finished"
    );

    let (mut delivered, mut lagged) = (0_u64, 0_u64);
    loop {
        match observer.try_recv() {
            Ok(_) => delivered += 1,
            Err(TryRecvError::Lagged(skipped)) => lagged += skipped,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    info!(delivered, lagged, "notifications observed");

    let summary = RegistrySummary::collect(&service)
        .map_err(|error| io::Error::other(format!("summarise registry: {error}")))?;

    for outcome in &outcomes {
        serde_json::to_writer(&mut output, outcome).map_err(io::Error::other)?;
        writeln!(output)?;
    }
    serde_json::to_writer(&mut output, &summary).map_err(io::Error::other)?;
    writeln!(output)?;
    output.flush()
}

#[cfg(test)]
mod tests {
    //! Coverage for the replay command wiring.

    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;
    use serde_json::{Value, json};

    const ALICE: &str = "0x00000000000000000000000000000000000000a1";
    const BOB: &str = "0x00000000000000000000000000000000000000b2";

    fn stdin_args() -> CliArgs {
        CliArgs { script: None }
    }

    fn default_settings() -> RegistrySettings {
        RegistrySettings {
            notification_capacity: None,
            reject_duplicate_follows: None,
        }
    }

    fn replay_lines(settings: &RegistrySettings, script: &Value) -> Vec<Value> {
        let mut output = Vec::new();
        run(
            &stdin_args(),
            settings,
            script.to_string().as_bytes(),
            &mut output,
        )
        .expect("replay should succeed");
        String::from_utf8(output)
            .expect("output is utf-8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is JSON"))
            .collect()
    }

    #[rstest]
    fn parses_script_flag() {
        let args = CliArgs::try_parse_from(["registry-replay", "--script", "calls.json"])
            .expect("valid arguments");
        assert_eq!(args.script, Some(PathBuf::from("calls.json")));

        let args = CliArgs::try_parse_from(["registry-replay"]).expect("valid arguments");
        assert!(args.script.is_none());
    }

    #[rstest]
    fn prints_one_outcome_per_call_then_summary() {
        let script = json!([
            {"op": "registerUser", "caller": ALICE, "name": "Name1", "age": 1, "state": "State1"},
            {"op": "registerUser", "caller": BOB, "name": "Name2", "age": 2, "state": "State2"},
            {"op": "addSong", "caller": ALICE, "songName": "Song1"},
            {"op": "addSong", "caller": ALICE, "songName": "Song2"},
            {"op": "follow", "caller": ALICE, "target": BOB},
        ]);

        let lines = replay_lines(&default_settings(), &script);
        assert_eq!(lines.len(), 6);

        for (line, sequence) in lines.iter().zip(1..=5) {
            assert_eq!(line["status"], json!("ok"));
            assert_eq!(line["notification"]["sequence"], json!(sequence));
        }
        assert_eq!(lines[4]["notification"]["event"]["type"], json!("userFollowed"));

        assert_eq!(
            lines[5],
            json!({
                "users": [
                    {
                        "identity": ALICE,
                        "name": "Name1",
                        "age": 1,
                        "state": "State1",
                        "recommendations": ["Song1", "Song2"],
                        "following": [BOB],
                    },
                    {
                        "identity": BOB,
                        "name": "Name2",
                        "age": 2,
                        "state": "State2",
                        "recommendations": [],
                        "following": [],
                    },
                ],
            })
        );
    }

    #[rstest]
    fn environment_can_reject_duplicate_follows() {
        let _guard = lock_env([
            ("SOCIAL_MUSIC_NOTIFICATION_CAPACITY", None::<String>),
            (
                "SOCIAL_MUSIC_REJECT_DUPLICATE_FOLLOWS",
                Some("true".to_owned()),
            ),
        ]);
        let settings = RegistrySettings::load_from_iter([OsString::from("registry-replay")])
            .expect("config should load");

        let script = json!([
            {"op": "registerUser", "caller": ALICE, "name": "Name1", "age": 1, "state": "State1"},
            {"op": "follow", "caller": ALICE, "target": BOB},
            {"op": "follow", "caller": ALICE, "target": BOB},
        ]);
        let lines = replay_lines(&settings, &script);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1]["status"], json!("ok"));
        assert_eq!(lines[2]["status"], json!("rejected"));
        assert_eq!(lines[2]["error"]["code"], json!("invalid_argument"));
        assert_eq!(lines[3]["users"][0]["following"], json!([BOB]));
    }

    #[rstest]
    fn duplicate_follows_are_kept_without_configuration() {
        let script = json!([
            {"op": "registerUser", "caller": ALICE, "name": "Name1", "age": 1, "state": "State1"},
            {"op": "follow", "caller": ALICE, "target": BOB},
            {"op": "follow", "caller": ALICE, "target": BOB},
        ]);
        let lines = replay_lines(&default_settings(), &script);

        assert_eq!(lines[2]["status"], json!("ok"));
        assert_eq!(lines[3]["users"][0]["following"], json!([BOB, BOB]));
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::bad_identity(r#"[{"op": "addSong", "caller": "alice", "songName": "Song1"}]"#)]
    fn malformed_scripts_fail_without_output(#[case] raw: &str) {
        let mut output = Vec::new();
        let error = run(&stdin_args(), &default_settings(), raw.as_bytes(), &mut output)
            .expect_err("malformed script must fail");

        assert!(error.to_string().contains("invalid call script"));
        assert!(output.is_empty());
    }

    #[rstest]
    fn missing_script_file_fails() {
        let args = CliArgs {
            script: Some(PathBuf::from("definitely/not/here/calls.json")),
        };
        let mut output = Vec::new();
        let error = run(&args, &default_settings(), io::empty(), &mut output)
            .expect_err("missing file must fail");

        assert!(error.to_string().contains("failed to read call script"));
        assert!(output.is_empty());
    }
}
