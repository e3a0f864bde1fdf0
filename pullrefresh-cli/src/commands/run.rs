use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use pullrefresh_core::reset::TRANSITION_END;
use pullrefresh_core::{
    Collaborators, Error, Options, Phase, PullRefresh, RefreshCallback, RefreshResult,
    ResistanceEngine,
};
use serde::Serialize;
use tokio::task::LocalSet;
use tokio::time::{sleep, sleep_until};
use tracing::info;

use crate::output::{print_output, print_single, print_success, print_warning, OutputFormat};
use crate::recorder::{
    Entry, ListProbe, RecordingHost, RecordingRoot, ScriptEvent, Timeline, TokioRuntime,
};
use crate::script::{Action, RefreshPlan, Script};

#[derive(Debug, Serialize)]
struct Report {
    phase: Phase,
    loading: bool,
    classes: Vec<&'static str>,
    timeline: Vec<Entry>,
}

pub async fn run(path: &Path, settle_ms: u64, format: OutputFormat) -> Result<()> {
    let script = Script::load(path)?;
    let options = Options::from_attributes(&script.options)?;

    info!(
        "replaying {} step(s) over {} ms",
        script.steps.len(),
        script.duration_ms()
    );

    let report = LocalSet::new()
        .run_until(replay(script, options, settle_ms))
        .await;

    match format {
        OutputFormat::Table => {
            let (phase, loading, classes) = (report.phase, report.loading, report.classes.join(" "));
            print_output(report.timeline, format)?;

            if loading {
                print_warning("still loading when the replay ended, raise --settle-ms");
            } else {
                print_success(&format!("ended {:?}, classes: [{}]", phase, classes));
            }
        }
        _ => print_single(&report, format)?,
    }

    Ok(())
}

async fn replay(script: Script, options: Options, settle_ms: u64) -> Report {
    let timeline = Timeline::new();
    let root = Rc::new(RecordingRoot::new(timeline.clone()));
    let host = Rc::new(RecordingHost::new(timeline.clone()));
    let engine = ResistanceEngine::new(options.config.threshold, options.config.resistance);
    let loader_height = script.loader_height;

    let activated = PullRefresh::activate(
        options,
        Collaborators {
            engine: Box::new(engine),
            root: root.clone(),
            host,
            loader: Rc::new(move || loader_height),
            runtime: Rc::new(TokioRuntime),
            refresh: refresh_callback(&script.refresh, &timeline),
        },
    );

    let Some(ptr) = activated else {
        timeline.record("disabled", "no listeners attached");
        return Report {
            phase: Phase::Idle,
            loading: false,
            classes: Vec::new(),
            timeline: timeline.entries(),
        };
    };

    let [start, moved, end] = ptr.listen(&ListProbe(script.supports.clone()));

    for step in &script.steps {
        sleep_until(timeline.started() + Duration::from_millis(step.at_ms)).await;

        let (name, y) = match step.action {
            Action::Start { y } => (start, y),
            Action::Move { y } => (moved, y),
            Action::End => (end, 0.0),
            Action::TransitionEnd => {
                let handlers = root.dispatch_once(TRANSITION_END);
                timeline.record("input", format!("{} ({} handler(s))", TRANSITION_END, handlers));
                continue;
            }
        };

        timeline.record("input", format!("{} y={}", name, y));
        root.dispatch(name, &ScriptEvent { y });
    }

    sleep(Duration::from_millis(settle_ms)).await;

    Report {
        phase: ptr.phase(),
        loading: ptr.is_loading(),
        classes: root.classes(),
        timeline: timeline.entries(),
    }
}

fn refresh_callback(plan: &RefreshPlan, timeline: &Timeline) -> Option<RefreshCallback> {
    let timeline = timeline.clone();

    let callback: RefreshCallback = match plan.clone() {
        RefreshPlan::None => return None,
        RefreshPlan::Done => Rc::new(move || {
            timeline.record("refresh", "done");
            Ok(RefreshResult::Done)
        }),
        RefreshPlan::After { after_ms, fail } => Rc::new(move || {
            timeline.record("refresh", format!("pending for {} ms", after_ms));
            let timeline = timeline.clone();

            Ok(RefreshResult::pending(async move {
                sleep(Duration::from_millis(after_ms)).await;
                if fail {
                    timeline.record("refresh", "failed");
                    Err(Error::Refresh("simulated failure".to_string()))
                } else {
                    timeline.record("refresh", "settled");
                    Ok(())
                }
            }))
        }),
        RefreshPlan::FailSync { message } => Rc::new(move || Err(Error::Refresh(message.clone()))),
    };

    Some(callback)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
[options]
content-offset = "40"

[refresh]
mode = "after"
after_ms = 300

[[steps]]
at_ms = 0
action = "start"
y = 0

[[steps]]
at_ms = 10
action = "move"
y = 100

[[steps]]
at_ms = 20
action = "end"
"#;

    fn details(report: &Report, kind: &str) -> Vec<String> {
        report
            .timeline
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.detail.clone())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_holds_loading_for_one_second() {
        let script = Script::from_toml(SCRIPT).unwrap();
        let options = Options::from_attributes(&script.options).unwrap();

        let report = LocalSet::new().run_until(replay(script, options, 1200)).await;

        assert!(!report.loading);
        assert_eq!(report.phase, Phase::Resetting);
        assert_eq!(report.classes, ["ptr-pull", "ptr-reset"]);
        assert_eq!(
            details(&report, "render"),
            [
                "content translate3d(0, 40px, 0) / loader translate3d(0, 0px, 0)",
                "rest"
            ]
        );

        let reset_at = report
            .timeline
            .iter()
            .find(|e| e.detail == "+ptr-reset")
            .map(|e| e.at_ms)
            .unwrap();
        assert!((1020..1025).contains(&reset_at), "reset after {} ms", reset_at);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_replay_records_nothing_else() {
        let mut script = Script::from_toml(SCRIPT).unwrap();
        script.options.insert("disabled".to_string(), "true".to_string());
        let options = Options::from_attributes(&script.options).unwrap();

        let report = LocalSet::new().run_until(replay(script, options, 0)).await;

        assert_eq!(report.timeline.len(), 1);
        assert_eq!(report.timeline[0].kind, "disabled");
        assert!(report.classes.is_empty());
    }
}
