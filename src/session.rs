//! Interactive session.
//!
//! The session is the only place reminders stay armed. It reads commands from
//! stdin, re-reads storage on a fixed interval, and rebuilds the reminder set
//! whenever the list changes: after a mutating command, a date rollover, an
//! edit made by another process, or a wake from suspend.

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use log::{debug, error, info, warn};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};

use crate::cli::{describe_error, execute, render, TaskCommand};
use crate::config::Config;
use crate::constants::{SESSION_PROMPT, SESSION_STARTED, SUSPEND_DRIFT_SECS};
use crate::entities::Tone;
use crate::notify::{PushGateway, PushNotifier, StdoutAlerter, TerminalBell, TerminalNotifier};
use crate::scheduler::ReminderScheduler;
use crate::tracker::{Tracker, TrackerError};

/// One line typed at the session prompt.
#[derive(Debug, Parser)]
#[command(name = "routinely", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    #[command(flatten)]
    Task(TaskCommand),
    /// Show armed reminders and how each will be delivered
    Pending,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// What handling a line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Continue(String),
    Quit,
}

/// Detects wall-clock jumps the monotonic clock did not see.
struct DriftWatch {
    wall: DateTime<Local>,
    mono: Instant,
}

impl DriftWatch {
    fn new(wall: DateTime<Local>) -> Self {
        Self {
            wall,
            mono: Instant::now(),
        }
    }

    /// True when wall time moved more than the monotonic clock since the last check
    fn check(&mut self, wall: DateTime<Local>) -> bool {
        let wall_elapsed = (wall - self.wall).num_seconds();
        let mono_elapsed = i64::try_from(self.mono.elapsed().as_secs()).unwrap_or(i64::MAX);
        self.wall = wall;
        self.mono = Instant::now();
        (wall_elapsed - mono_elapsed).abs() > SUSPEND_DRIFT_SECS
    }
}

/// Tracker plus armed reminders.
pub struct Session {
    tracker: Tracker,
    scheduler: ReminderScheduler,
    default_tone: Tone,
    refresh: Duration,
}

impl Session {
    pub fn new(tracker: Tracker, scheduler: ReminderScheduler, default_tone: Tone, refresh: Duration) -> Self {
        Self {
            tracker,
            scheduler,
            default_tone,
            refresh,
        }
    }

    /// Wire the terminal notifiers and the optional push gateway
    pub fn from_config(tracker: Tracker, config: &Config) -> Self {
        let push = PushGateway::from_config(&config.push).map(|gateway| Arc::new(gateway) as Arc<dyn PushNotifier>);
        let scheduler = ReminderScheduler::new(
            tracker.clock(),
            push,
            Arc::new(TerminalNotifier::new(config.reminders.local_notifications)),
            Arc::new(TerminalBell),
            Arc::new(StdoutAlerter),
        );
        Self::new(
            tracker,
            scheduler,
            config.reminders.default_tone(),
            Duration::from_secs(config.reminders.refresh_interval_seconds),
        )
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Ask for permissions and arm today's reminders. Returns the dashboard.
    pub fn start(&mut self) -> String {
        let permission = self.scheduler.request_permissions();
        debug!("Local notification permission: {:?}", permission);
        if self.scheduler.has_remote_path() {
            info!("Push delivery available");
        }
        self.scheduler.reschedule_all(self.tracker.today());
        format!(
            "{}\n\n{}",
            render::dashboard(self.tracker.today_date(), self.tracker.progress()),
            render::daily_list(self.tracker.today())
        )
    }

    /// Parse and run one input line
    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return LineOutcome::Continue(String::new());
        }

        let parsed = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            // Also covers `help`, which clap reports as an error carrying the text.
            Err(e) => return LineOutcome::Continue(e.render().to_string().trim_end().to_string()),
        };

        if matches!(parsed.command, SessionCommand::Quit) {
            return LineOutcome::Quit;
        }
        if let Err(e) = self.follow_date().await {
            error!("Failed to load the new day: {}", e);
            return LineOutcome::Continue(describe_error(&e));
        }

        match parsed.command {
            SessionCommand::Quit => LineOutcome::Quit,
            SessionCommand::Pending => LineOutcome::Continue(render::pending(&self.scheduler.pending())),
            SessionCommand::Task(command) => match execute(&mut self.tracker, command, self.default_tone).await {
                Ok(outcome) => {
                    if outcome.reschedule {
                        self.scheduler.reschedule_all(self.tracker.today());
                    }
                    LineOutcome::Continue(outcome.output)
                }
                Err(e) => {
                    warn!("Command failed: {}", e);
                    LineOutcome::Continue(describe_error(&e))
                }
            },
        }
    }

    /// Switch to the current day's list before a command touches it.
    ///
    /// The refresh tick can be far apart, so a command typed just after
    /// midnight would otherwise read and write the previous day.
    async fn follow_date(&mut self) -> Result<(), TrackerError> {
        if !self.tracker.is_stale() {
            return Ok(());
        }
        self.tracker.reload().await?;
        self.scheduler.reschedule_all(self.tracker.today());
        Ok(())
    }

    /// Re-read storage and rebuild reminders if anything changed.
    ///
    /// `resumed` forces a rebuild after the machine slept. Returns whether a
    /// rebuild happened.
    pub async fn refresh(&mut self, resumed: bool) -> bool {
        let changed = match self.tracker.reload().await {
            Ok(changed) => changed,
            Err(e) => {
                error!("Failed to reload tasks: {}", e);
                false
            }
        };
        if changed || resumed {
            debug!("Refreshing reminders (changed={}, resumed={})", changed, resumed);
            self.scheduler.reschedule_all(self.tracker.today());
            return true;
        }
        false
    }

    /// Run until `quit`, end of input or ctrl-c
    pub async fn run<R: AsyncBufRead + Unpin>(mut self, input: R) -> Result<()> {
        println!("{}\n", SESSION_STARTED);
        println!("{}", self.start());
        prompt();

        let mut lines = input.lines();
        let mut ticker = tokio::time::interval(self.refresh);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;
        let mut drift = DriftWatch::new(self.tracker.clock().now());

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match self.handle_line(&line).await {
                        LineOutcome::Quit => break,
                        LineOutcome::Continue(output) => {
                            if !output.is_empty() {
                                println!("{}", output);
                            }
                        }
                    }
                    prompt();
                }
                _ = ticker.tick() => {
                    let resumed = drift.check(self.tracker.clock().now());
                    if resumed {
                        info!("Clock jumped ahead, assuming the machine was suspended");
                    }
                    self.refresh(resumed).await;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    break;
                }
            }
        }

        info!("Session ended");
        Ok(())
    }

    pub async fn run_stdin(self) -> Result<()> {
        self.run(BufReader::new(tokio::io::stdin())).await
    }
}

fn prompt() {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{}", SESSION_PROMPT);
    let _ = stdout.flush();
}
