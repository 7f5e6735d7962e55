//! Replay command - drive the filter panel from a script
//!
//! A script is a TOML file with an optional starting query string and a list
//! of steps. Time only moves when a step says so, and navigations only land
//! on `settle`, so a replay is fully deterministic:
//!
//! ```toml
//! initial = "search=pump&page=3"
//!
//! [[step]]
//! input = { key = "search", text = "" }
//!
//! [[step]]
//! advance_ms = 600
//!
//! [[step]]
//! settle = true
//! ```
//!
//! Step kinds: `input`, `toggle`, `sort`, `page`, `clear`, `advance_ms`,
//! `settle`, `back`, `forward`, `external` and `reject`. Each `[[step]]`
//! holds exactly one of them.

use crate::{
    AppError, Result,
    config::{NavigationErrorPolicy, SyncSettings},
    output,
    query::{FilterKey, SortOrder},
    store::{MemoryRouter, QueryStore},
    sync::{Clock, FilterPanel, ManualClock},
    ui::output::OutputWriter,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Text typed into a field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputStep {
    pub key: FilterKey,
    pub text: String,
}

/// Checkbox flipped in a group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleStep {
    pub key: FilterKey,
    pub id: String,
}

/// One `[[step]]` table as written in the script
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStep {
    input: Option<InputStep>,
    toggle: Option<ToggleStep>,
    sort: Option<SortOrder>,
    page: Option<u32>,
    clear: Option<bool>,
    advance_ms: Option<u64>,
    settle: Option<bool>,
    back: Option<bool>,
    forward: Option<bool>,
    external: Option<String>,
    reject: Option<usize>,
}

/// A replay action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Type into a text field
    Input(InputStep),
    /// Flip a checkbox
    Toggle(ToggleStep),
    /// Pick a sort order
    Sort(SortOrder),
    /// Pick a result page
    Page(u32),
    /// Clear every filter
    Clear,
    /// Let time pass, firing timers as they come due
    AdvanceMs(u64),
    /// Land every queued navigation
    Settle,
    /// Browser back button
    Back,
    /// Browser forward button
    Forward,
    /// URL replaced from outside the panel
    External(String),
    /// Refuse the next N navigations
    Reject(usize),
}

/// A `[[step]]` table that does not name exactly one action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("step has no action")]
    NoAction,

    #[error("step has {0} actions, expected one")]
    MultipleActions(usize),
}

impl TryFrom<RawStep> for Step {
    type Error = StepError;

    fn try_from(raw: RawStep) -> std::result::Result<Self, Self::Error> {
        let mut steps = Vec::new();
        steps.extend(raw.input.map(Self::Input));
        steps.extend(raw.toggle.map(Self::Toggle));
        steps.extend(raw.sort.map(Self::Sort));
        steps.extend(raw.page.map(Self::Page));
        steps.extend(raw.clear.filter(|set| *set).map(|_| Self::Clear));
        steps.extend(raw.advance_ms.map(Self::AdvanceMs));
        steps.extend(raw.settle.filter(|set| *set).map(|_| Self::Settle));
        steps.extend(raw.back.filter(|set| *set).map(|_| Self::Back));
        steps.extend(raw.forward.filter(|set| *set).map(|_| Self::Forward));
        steps.extend(raw.external.map(Self::External));
        steps.extend(raw.reject.map(Self::Reject));

        match steps.len() {
            1 => Ok(steps.remove(0)),
            0 => Err(StepError::NoAction),
            n => Err(StepError::MultipleActions(n)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(input) => write!(f, "input {} = {:?}", input.key, input.text),
            Self::Toggle(toggle) => write!(f, "toggle {} {}", toggle.key, toggle.id),
            Self::Sort(order) => write!(f, "sort {order}"),
            Self::Page(page) => write!(f, "page {page}"),
            Self::Clear => f.write_str("clear"),
            Self::AdvanceMs(ms) => write!(f, "advance {ms}ms"),
            Self::Settle => f.write_str("settle"),
            Self::Back => f.write_str("back"),
            Self::Forward => f.write_str("forward"),
            Self::External(query) => write!(f, "external {query}"),
            Self::Reject(count) => write!(f, "reject next {count}"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScript {
    #[serde(default)]
    initial: String,
    debounce_ms: Option<u64>,
    coalesce_commits: Option<bool>,
    navigation_errors: Option<NavigationErrorPolicy>,
    #[serde(default, rename = "step")]
    steps: Vec<RawStep>,
}

/// A parsed replay script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayScript {
    /// Query string the router starts on
    pub initial: String,
    /// Settings overrides from the script header
    pub debounce_ms: Option<u64>,
    pub coalesce_commits: Option<bool>,
    pub navigation_errors: Option<NavigationErrorPolicy>,
    pub steps: Vec<Step>,
}

impl ReplayScript {
    /// Parse a script
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` for malformed TOML or unknown fields, and
    /// `AppError::ScriptStep` for a step without exactly one action.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: RawScript = toml::from_str(text)?;
        let steps = raw
            .steps
            .into_iter()
            .enumerate()
            .map(|(idx, step)| {
                Step::try_from(step).map_err(|source| AppError::ScriptStep {
                    step: idx + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            initial: raw.initial,
            debounce_ms: raw.debounce_ms,
            coalesce_commits: raw.coalesce_commits,
            navigation_errors: raw.navigation_errors,
            steps,
        })
    }

    /// Read and parse a script file
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, or any error from
    /// [`ReplayScript::parse`].
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Apply header overrides on top of configured settings
    #[must_use]
    pub fn settings(&self, base: &SyncSettings) -> SyncSettings {
        let mut settings = base.clone();
        if let Some(ms) = self.debounce_ms {
            settings = settings.with_debounce_ms(ms);
        }
        if let Some(coalesce) = self.coalesce_commits {
            settings = settings.with_coalesce_commits(coalesce);
        }
        if let Some(policy) = self.navigation_errors {
            settings = settings.with_navigation_errors(policy);
        }
        settings
    }
}

/// A `navigate` call made during the replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayNavigation {
    /// 1-based step that caused it
    pub step: usize,
    pub href: String,
    pub accepted: bool,
}

/// A notice raised during the replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayNotice {
    pub step: usize,
    pub text: String,
}

/// Text field state at the end of the replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayField {
    pub key: FilterKey,
    pub value: String,
    pub is_editing: bool,
}

/// Everything a replay observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub initial: String,
    pub navigations: Vec<ReplayNavigation>,
    pub notices: Vec<ReplayNotice>,
    pub fields: Vec<ReplayField>,
    /// Query string after every queued navigation has landed
    pub final_href: String,
    pub elapsed_ms: u64,
}

/// Run a script against a fresh router and virtual clock
///
/// Every step is followed by one event loop tick. Queued navigations are
/// landed at the end so `final_href` is the settled URL.
///
/// # Errors
///
/// Returns `AppError::Sync` if a step is invalid for the panel (a toggle on
/// a text key, page 0, ...).
pub fn run(script: &ReplayScript, base: &SyncSettings) -> Result<ReplayReport> {
    let router = MemoryRouter::new(&script.initial);
    let clock = ManualClock::new();
    let mut panel = FilterPanel::builder()
        .store(&router)
        .clock(clock.clone())
        .settings(script.settings(base))
        .build()?;

    let mut navigations = Vec::new();
    let mut notices = Vec::new();

    for (idx, step) in script.steps.iter().enumerate() {
        let number = idx + 1;
        let calls_before = router.call_count();
        debug!(step = number, action = %step, "replay step");

        apply_step(&mut panel, &router, &clock, step)?;

        navigations.extend(router.calls().into_iter().skip(calls_before).map(|call| {
            ReplayNavigation {
                step: number,
                href: call.href,
                accepted: call.accepted,
            }
        }));
        notices.extend(panel.drain_notices().into_iter().map(|notice| ReplayNotice {
            step: number,
            text: notice.text,
        }));
    }

    router.settle();
    panel.tick()?;

    let fields = panel
        .view()
        .fields
        .into_iter()
        .map(|field| ReplayField {
            key: field.key,
            value: field.value,
            is_editing: field.is_editing,
        })
        .collect();

    let report = ReplayReport {
        initial: script.initial.clone(),
        navigations,
        notices,
        fields,
        final_href: router.current().to_href(),
        elapsed_ms: u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    info!(
        steps = script.steps.len(),
        navigations = report.navigations.len(),
        "replay finished"
    );
    Ok(report)
}

fn apply_step(
    panel: &mut FilterPanel<&MemoryRouter, ManualClock>,
    router: &MemoryRouter,
    clock: &ManualClock,
    step: &Step,
) -> Result<()> {
    match step {
        Step::Input(input) => panel.on_input_change(input.key, input.text.as_str())?,
        Step::Toggle(toggle) => {
            panel.toggle(toggle.key, &toggle.id)?;
        }
        Step::Sort(order) => {
            panel.set_sort(*order)?;
        }
        Step::Page(page) => {
            panel.go_to_page(*page)?;
        }
        Step::Clear => {
            panel.clear_filters()?;
        }
        Step::AdvanceMs(ms) => {
            let target = clock.now() + Duration::from_millis(*ms);
            while let Some(deadline) = panel.next_deadline()
                && deadline <= target
            {
                clock.advance(deadline.saturating_duration_since(clock.now()));
                panel.tick()?;
            }
            clock.advance(target.saturating_duration_since(clock.now()));
        }
        Step::Settle => {
            router.settle();
        }
        Step::Back => {
            router.back();
        }
        Step::Forward => {
            router.forward();
        }
        Step::External(query) => router.visit(query),
        Step::Reject(count) => router.reject_next(*count),
    }
    panel.tick()?;
    Ok(())
}

/// Execute the replay command
///
/// # Errors
///
/// Returns any error from loading or running the script, or
/// `AppError::Json` if JSON output cannot be produced.
pub fn execute(path: &Path, base: &SyncSettings, json: bool, out: &dyn OutputWriter) -> Result<()> {
    let script = ReplayScript::load(path)?;
    let report = run(&script, base)?;

    if json {
        out.write(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    out.info(&format!(
        "start {}",
        if report.initial.is_empty() { "(empty)" } else { report.initial.as_str() }
    ));
    for navigation in &report.navigations {
        out.write(&output::navigation_line(
            navigation.step,
            &navigation.href,
            navigation.accepted,
        ));
    }
    for notice in &report.notices {
        out.warning(&format!("[{:>3}] {}", notice.step, notice.text));
    }
    out.info(&format!(
        "{} navigation(s) over {}ms",
        report.navigations.len(),
        report.elapsed_ms
    ));
    out.write(&report.final_href);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempFile;
    use crate::ui::{MessageLevel, StatusBarWriter};
    use pretty_assertions::assert_eq;

    fn replay(text: &str) -> ReplayReport {
        run(&ReplayScript::parse(text).unwrap(), &SyncSettings::default()).unwrap()
    }

    fn hrefs(report: &ReplayReport) -> Vec<&str> {
        report.navigations.iter().map(|n| n.href.as_str()).collect()
    }

    #[test]
    fn test_parse_steps() {
        let script = ReplayScript::parse(
            r#"
            initial = "?brandId=b1"
            debounce_ms = 300

            [[step]]
            toggle = { key = "brandId", id = "b2" }

            [[step]]
            sort = "price_desc"

            [[step]]
            clear = true
            "#,
        )
        .unwrap();

        assert_eq!(script.debounce_ms, Some(300));
        assert_eq!(
            script.steps,
            vec![
                Step::Toggle(ToggleStep {
                    key: FilterKey::BrandId,
                    id: "b2".to_string()
                }),
                Step::Sort(SortOrder::PriceDesc),
                Step::Clear,
            ]
        );
    }

    #[test]
    fn test_step_needs_exactly_one_action() {
        let err = ReplayScript::parse("[[step]]\nsettle = true\nback = true\n").unwrap_err();
        assert!(matches!(
            err,
            AppError::ScriptStep {
                step: 1,
                source: StepError::MultipleActions(2)
            }
        ));
        assert!(err.to_string().contains("step 1: step has 2 actions"));

        let err = ReplayScript::parse("[[step]]\nsettle = true\n\n[[step]]\n").unwrap_err();
        assert!(matches!(
            err,
            AppError::ScriptStep {
                step: 2,
                source: StepError::NoAction
            }
        ));
    }

    #[test]
    fn test_false_flags_are_not_actions() {
        let raw = RawStep {
            settle: Some(false),
            advance_ms: Some(10),
            ..RawStep::default()
        };
        assert_eq!(Step::try_from(raw), Ok(Step::AdvanceMs(10)));

        let raw = RawStep {
            clear: Some(false),
            ..RawStep::default()
        };
        assert_eq!(Step::try_from(raw), Err(StepError::NoAction));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = ReplayScript::parse("[[step]]\nteleport = 3\n").unwrap_err();
        assert!(matches!(err, AppError::Script(_)));
    }

    #[test]
    fn test_clearing_search_removes_key() {
        let report = replay(
            r#"
            initial = "search=pump&page=3"
            [[step]]
            input = { key = "search", text = "" }
            [[step]]
            advance_ms = 600
            "#,
        );
        assert_eq!(hrefs(&report), vec!["?page=1"]);
        assert_eq!(report.final_href, "?page=1");
    }

    #[test]
    fn test_typing_burst_commits_once() {
        let report = replay(
            r#"
            [[step]]
            input = { key = "search", text = "s" }
            [[step]]
            advance_ms = 100
            [[step]]
            input = { key = "search", text = "se" }
            [[step]]
            advance_ms = 100
            [[step]]
            input = { key = "search", text = "sen" }
            [[step]]
            advance_ms = 1000
            "#,
        );
        assert_eq!(hrefs(&report), vec!["?search=sen&page=1"]);
        assert_eq!(report.navigations[0].step, 6);
        assert_eq!(report.elapsed_ms, 1200);
    }

    #[test]
    fn test_staggered_timers_fire_in_deadline_order() {
        let report = replay(
            r#"
            [[step]]
            input = { key = "maxPrice", text = "50" }
            [[step]]
            advance_ms = 200
            [[step]]
            input = { key = "search", text = "pump" }
            [[step]]
            advance_ms = 2000
            "#,
        );
        assert_eq!(
            hrefs(&report),
            vec!["?maxPrice=50&page=1", "?search=pump&maxPrice=50&page=1"]
        );
    }

    #[test]
    fn test_clear_wins_over_pending_edit() {
        let report = replay(
            r#"
            initial = "brandId=b1&sort=price_asc&page=4"
            [[step]]
            input = { key = "minPrice", text = "10" }
            [[step]]
            clear = true
            [[step]]
            advance_ms = 2000
            "#,
        );
        assert_eq!(hrefs(&report), vec!["?page=1"]);
        let min = report
            .fields
            .iter()
            .find(|field| field.key == FilterKey::MinPrice)
            .unwrap();
        assert_eq!(min.value, "");
        assert!(!min.is_editing);
    }

    #[test]
    fn test_back_restores_field() {
        let report = replay(
            r#"
            initial = "search=pump"
            [[step]]
            input = { key = "search", text = "valve" }
            [[step]]
            advance_ms = 500
            [[step]]
            settle = true
            [[step]]
            back = true
            "#,
        );
        assert_eq!(report.final_href, "?search=pump");
        assert_eq!(report.fields[0].value, "pump");
    }

    #[test]
    fn test_rejected_navigation_is_reported() {
        let report = replay(
            r#"
            [[step]]
            reject = 1
            [[step]]
            page = 2
            "#,
        );
        assert_eq!(report.navigations.len(), 1);
        assert!(!report.navigations[0].accepted);
        assert_eq!(report.notices.len(), 1);
        assert_eq!(report.notices[0].step, 2);
        assert_eq!(report.final_href, "");
    }

    #[test]
    fn test_header_overrides_settings() {
        let script = ReplayScript::parse("debounce_ms = 100\ncoalesce_commits = true\n").unwrap();
        let settings = script.settings(&SyncSettings::default());
        assert_eq!(settings.debounce_ms, 100);
        assert!(settings.coalesce_commits);
        assert_eq!(settings.navigation_errors, NavigationErrorPolicy::Surface);
    }

    #[test]
    fn test_invalid_panel_operation_fails_run() {
        let script = ReplayScript::parse("[[step]]\ntoggle = { key = \"search\", id = \"x\" }\n").unwrap();
        let err = run(&script, &SyncSettings::default()).unwrap_err();
        assert!(matches!(err, AppError::Sync(_)));
    }

    #[test]
    fn test_execute_prints_final_href() {
        let file = TempFile::create(
            "execute.toml",
            "initial = \"page=2\"\n[[step]]\nsort = \"price_asc\"\n",
        )
        .unwrap();
        let out = StatusBarWriter::new();

        execute(file.path(), &SyncSettings::default(), false, &out).unwrap();

        assert_eq!(
            out.latest_message(),
            Some((MessageLevel::Normal, "?sort=price_asc&page=1".to_string()))
        );
    }

    #[test]
    fn test_execute_missing_script_is_io_error() {
        let out = StatusBarWriter::new();
        let err = execute(Path::new("/nonexistent/script.toml"), &SyncSettings::default(), false, &out)
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
