//! Launch orchestrator - probe, optional packager spawn, build, run.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{BuildConfig, LaunchSettings};
use crate::error::LaunchError;
use crate::ports::{
    CommandSpec, LaunchEvent, LaunchReporter, NoopReporter, ProcessLauncher, ProcessOutcome,
    ServerProbe, ServerState,
};
use crate::project::{ProjectLayout, ProjectLocator};
use crate::run_args::run_script_args;
use crate::state::{LaunchState, StateTrace};

/// Summary of a successful launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// Always [`LaunchState::Done`] for a returned report.
    pub final_state: LaunchState,
    /// What the probe reported before the build.
    pub server_state: ServerState,
    /// Whether a detached packager was started.
    pub server_spawned: bool,
    /// Every state visited, starting at `Idle`.
    pub transitions: Vec<LaunchState>,
}

/// Sequences a single build-and-launch.
///
/// Holds no per-launch state, so calling [`launch`](Self::launch) again
/// with the same configuration repeats the full build and run.
pub struct LaunchOrchestrator {
    locator: ProjectLocator,
    probe: Arc<dyn ServerProbe>,
    launcher: Arc<dyn ProcessLauncher>,
    reporter: Arc<dyn LaunchReporter>,
    settings: LaunchSettings,
}

impl LaunchOrchestrator {
    /// Create an orchestrator for the current platform with default settings
    /// and no reporter.
    pub fn new(probe: Arc<dyn ServerProbe>, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            locator: ProjectLocator::current(),
            probe,
            launcher,
            reporter: Arc::new(NoopReporter::new()),
            settings: LaunchSettings::default(),
        }
    }

    #[must_use]
    pub fn with_locator(mut self, locator: ProjectLocator) -> Self {
        self.locator = locator;
        self
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn LaunchReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: LaunchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run the full sequence for `config`.
    ///
    /// # Errors
    ///
    /// - [`LaunchError::ProjectNotFound`] / [`LaunchError::UnsupportedPlatform`]
    ///   if the project gate fails; nothing is probed or executed.
    /// - [`LaunchError::BuildFailed`] if the build exits unsuccessfully; the
    ///   run script is not invoked.
    /// - [`LaunchError::RunFailed`] if the run script exits unsuccessfully.
    pub async fn launch(&self, config: &BuildConfig) -> Result<LaunchReport, LaunchError> {
        let layout = self.locate(config)?;
        let mut trace = StateTrace::new();

        trace.advance(LaunchState::Probing);
        let (host, port) = (config.probe_host(), config.probe_port());
        let server_state = self.probe.probe(host, port).await;
        info!(state = %server_state, host, port, "packager probed");
        self.reporter.report(LaunchEvent::PackagerState(server_state));

        let server_spawned = if server_state.needs_spawn() {
            trace.advance(LaunchState::SpawningServer);
            self.spawn_packager(&layout)
        } else {
            trace.advance(LaunchState::SkippingSpawn);
            false
        };

        trace.advance(LaunchState::Building);
        self.reporter.report(LaunchEvent::Building);
        if let ProcessOutcome::Failure {
            exit_code,
            stdout,
            stderr,
        } = self.execute(&layout.build_command())
        {
            trace.advance(LaunchState::Aborted);
            self.reporter
                .report(LaunchEvent::BuildFailed { stdout, stderr });
            return Err(LaunchError::BuildFailed { exit_code });
        }

        trace.advance(LaunchState::Running);
        self.reporter.report(LaunchEvent::StartingApp);
        let run = layout.run_command(run_script_args(config));
        if let ProcessOutcome::Failure {
            exit_code,
            stdout,
            stderr,
        } = self.execute(&run)
        {
            trace.advance(LaunchState::Aborted);
            self.reporter.report(LaunchEvent::RunFailed { stdout, stderr });
            return Err(LaunchError::RunFailed { exit_code });
        }

        trace.advance(LaunchState::Done);
        Ok(LaunchReport {
            final_state: trace.current(),
            server_state,
            server_spawned,
            transitions: trace.into_states(),
        })
    }

    fn locate(&self, config: &BuildConfig) -> Result<ProjectLayout, LaunchError> {
        self.locator
            .locate(config)
            .inspect_err(|err| self.reporter.report(self.gate_event(config, err)))
    }

    /// User-facing event for a failed project gate.
    fn gate_event(&self, config: &BuildConfig, err: &LaunchError) -> LaunchEvent {
        match err {
            LaunchError::Io(io) => LaunchEvent::ProjectUnreadable {
                root: config.root().to_path_buf(),
                reason: io.to_string(),
            },
            LaunchError::ProjectNotFound { manifest } => LaunchEvent::ProjectNotFound {
                manifest: manifest.clone(),
                platform: self.locator.platform().to_string(),
            },
            _ => LaunchEvent::ProjectNotFound {
                manifest: ProjectLayout::resolve(config.root())
                    .map(|layout| layout.manifest_path())
                    .unwrap_or_else(|_| config.root().to_path_buf()),
                platform: self.locator.platform().to_string(),
            },
        }
    }

    /// Fire-and-forget packager start. A failure is reported but does not
    /// stop the launch.
    fn spawn_packager(&self, layout: &ProjectLayout) -> bool {
        let script = self
            .settings
            .packager_script
            .clone()
            .unwrap_or_else(|| layout.default_packager_script());
        let spec = CommandSpec::new(&self.settings.terminal)
            .arg("-e")
            .arg(script.to_string_lossy());

        debug!(command = %spec, "spawning detached packager");
        match self.launcher.spawn_detached(&spec) {
            Ok(()) => true,
            Err(err) => {
                warn!("packager spawn failed: {err}");
                self.reporter.report(LaunchEvent::PackagerSpawnFailed {
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    fn execute(&self, spec: &CommandSpec) -> ProcessOutcome {
        debug!(command = %spec, cwd = ?spec.working_dir(), "running step");
        let outcome = self.launcher.run(spec);
        if !outcome.is_success() {
            warn!(command = %spec, "step failed");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ProcessError;
    use async_trait::async_trait;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct MockProbe {
        state: ServerState,
        calls: AtomicUsize,
        targets: Mutex<Vec<(String, String)>>,
    }

    impl MockProbe {
        fn new(state: ServerState) -> Self {
            Self {
                state,
                calls: AtomicUsize::new(0),
                targets: Mutex::new(vec![]),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn targets(&self) -> Vec<(String, String)> {
            self.targets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ServerProbe for MockProbe {
        async fn probe(&self, host: &str, port: &str) -> ServerState {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.targets
                .lock()
                .unwrap()
                .push((host.to_string(), port.to_string()));
            self.state
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Run(CommandSpec),
        Detached(CommandSpec),
    }

    struct MockLauncher {
        calls: Mutex<Vec<Call>>,
        build_exit: i32,
        run_exit: i32,
        detached_fails: bool,
    }

    impl MockLauncher {
        fn new(build_exit: i32, run_exit: i32) -> Self {
            Self {
                calls: Mutex::new(vec![]),
                build_exit,
                run_exit,
                detached_fails: false,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn runs(&self) -> Vec<CommandSpec> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Run(spec) => Some(spec),
                    Call::Detached(_) => None,
                })
                .collect()
        }

        fn detached(&self) -> Vec<CommandSpec> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Detached(spec) => Some(spec),
                    Call::Run(_) => None,
                })
                .collect()
        }
    }

    impl ProcessLauncher for MockLauncher {
        fn run(&self, spec: &CommandSpec) -> ProcessOutcome {
            self.calls.lock().unwrap().push(Call::Run(spec.clone()));
            let code = if spec.program() == std::path::Path::new("sh") {
                self.build_exit
            } else {
                self.run_exit
            };
            if code == 0 {
                ProcessOutcome::Success
            } else {
                ProcessOutcome::Failure {
                    exit_code: Some(code),
                    stdout: b"out".to_vec(),
                    stderr: b"err".to_vec(),
                }
            }
        }

        fn spawn_detached(&self, spec: &CommandSpec) -> Result<(), ProcessError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Detached(spec.clone()));
            if self.detached_fails {
                Err(ProcessError::SpawnFailed {
                    program: spec.program().display().to_string(),
                    reason: "not found".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<LaunchEvent>>,
    }

    impl LaunchReporter for RecordingReporter {
        fn report(&self, event: LaunchEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("ubuntu")).unwrap();
        fs::write(dir.path().join("ubuntu/CMakeLists.txt"), "").unwrap();
        dir
    }

    fn orchestrator(
        probe: &Arc<MockProbe>,
        launcher: &Arc<MockLauncher>,
        platform: &str,
    ) -> LaunchOrchestrator {
        LaunchOrchestrator::new(probe.clone(), launcher.clone())
            .with_locator(ProjectLocator::for_platform(platform))
    }

    #[tokio::test]
    async fn test_missing_manifest_invokes_nothing() {
        let dir = TempDir::new().unwrap();
        let probe = Arc::new(MockProbe::new(ServerState::NotRunning));
        let launcher = Arc::new(MockLauncher::new(0, 0));
        let reporter = Arc::new(RecordingReporter::default());

        let err = orchestrator(&probe, &launcher, "linux")
            .with_reporter(reporter.clone())
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::ProjectNotFound { .. }));
        assert_eq!(err.terminal_state(), LaunchState::Idle);
        assert_eq!(probe.calls(), 0);
        assert!(launcher.calls().is_empty());

        let events = reporter.events.lock().unwrap();
        assert!(matches!(
            events.as_slice(),
            [LaunchEvent::ProjectNotFound { .. }]
        ));
    }

    #[test]
    fn test_unreadable_root_is_not_reported_as_missing_project() {
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(0, 0));
        let config = BuildConfig::new("");
        let err = LaunchError::Io(std::io::Error::other("cwd removed"));

        let event = orchestrator(&probe, &launcher, "linux").gate_event(&config, &err);

        assert_eq!(
            event,
            LaunchEvent::ProjectUnreadable {
                root: PathBuf::new(),
                reason: "cwd removed".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unsupported_platform_invokes_nothing() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(0, 0));

        let err = orchestrator(&probe, &launcher, "darwin")
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::UnsupportedPlatform { .. }));
        assert_eq!(probe.calls(), 0);
        assert!(launcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_running_server_is_not_spawned() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(0, 0));

        let report = orchestrator(&probe, &launcher, "linux")
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap();

        assert!(!report.server_spawned);
        assert!(launcher.detached().is_empty());
        assert_eq!(launcher.runs().len(), 2);
        assert_eq!(report.final_state, LaunchState::Done);
    }

    #[tokio::test]
    async fn test_probe_targets_configured_host_and_port() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(0, 0));
        let config = BuildConfig::new(dir.path())
            .with_host("10.0.0.2")
            .with_port("9090");

        orchestrator(&probe, &launcher, "linux")
            .launch(&config)
            .await
            .unwrap();

        assert_eq!(
            probe.targets(),
            vec![("10.0.0.2".to_string(), "9090".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_host_or_port_probes_default_packager() {
        let dir = project();

        for (host, port) in [("", "8081"), ("localhost", ""), ("", "")] {
            let probe = Arc::new(MockProbe::new(ServerState::Running));
            let launcher = Arc::new(MockLauncher::new(0, 0));
            let config = BuildConfig::new(dir.path())
                .with_host(host)
                .with_port(port);

            let report = orchestrator(&probe, &launcher, "linux")
                .launch(&config)
                .await
                .unwrap();

            assert_eq!(
                probe.targets(),
                vec![("localhost".to_string(), "8081".to_string())],
                "host={host:?} port={port:?}"
            );
            assert!(!report.server_spawned);
            assert!(launcher.detached().is_empty());
            // Empty values are still dropped from the run script
            let run = &launcher.runs()[1];
            assert!(
                run.arguments()
                    .iter()
                    .all(|a| a != "--host=" && a != "--port=")
            );
        }
    }

    #[tokio::test]
    async fn test_unrecognized_server_behaves_like_running() {
        let dir = project();
        let config = BuildConfig::new(dir.path());

        let running_launcher = Arc::new(MockLauncher::new(0, 0));
        let running = orchestrator(
            &Arc::new(MockProbe::new(ServerState::Running)),
            &running_launcher,
            "linux",
        )
        .launch(&config)
        .await
        .unwrap();

        let unrecognized_launcher = Arc::new(MockLauncher::new(0, 0));
        let unrecognized = orchestrator(
            &Arc::new(MockProbe::new(ServerState::Unrecognized)),
            &unrecognized_launcher,
            "linux",
        )
        .launch(&config)
        .await
        .unwrap();

        assert!(!unrecognized.server_spawned);
        assert_eq!(running_launcher.calls(), unrecognized_launcher.calls());
        assert_eq!(running.transitions, unrecognized.transitions);
    }

    #[tokio::test]
    async fn test_not_running_spawns_once_before_build() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::NotRunning));
        let launcher = Arc::new(MockLauncher::new(0, 0));

        orchestrator(&probe, &launcher, "linux")
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap();

        let calls = launcher.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], Call::Detached(_)));
        assert!(matches!(calls[1], Call::Run(_)));

        let spawn = &launcher.detached()[0];
        assert_eq!(spawn.program(), std::path::Path::new("gnome-terminal"));
        assert_eq!(
            spawn.arguments(),
            &[
                "-e".to_string(),
                dir.path()
                    .join("node_modules/react-native/packager/packager.sh")
                    .to_string_lossy()
                    .into_owned()
            ]
        );
    }

    #[tokio::test]
    async fn test_spawn_uses_configured_terminal_and_script() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::NotRunning));
        let launcher = Arc::new(MockLauncher::new(0, 0));
        let settings = LaunchSettings {
            packager_script: Some(PathBuf::from("/opt/packager.sh")),
            terminal: "xterm".to_string(),
        };

        orchestrator(&probe, &launcher, "linux")
            .with_settings(settings)
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap();

        let spawn = &launcher.detached()[0];
        assert_eq!(spawn.program(), std::path::Path::new("xterm"));
        assert_eq!(spawn.arguments(), &["-e", "/opt/packager.sh"]);
    }

    #[tokio::test]
    async fn test_spawn_failure_does_not_stop_launch() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::NotRunning));
        let launcher = Arc::new(MockLauncher {
            detached_fails: true,
            ..MockLauncher::new(0, 0)
        });
        let reporter = Arc::new(RecordingReporter::default());

        let report = orchestrator(&probe, &launcher, "linux")
            .with_reporter(reporter.clone())
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap();

        assert!(!report.server_spawned);
        assert_eq!(launcher.runs().len(), 2);
        assert!(
            reporter
                .events
                .lock()
                .unwrap()
                .iter()
                .any(|e| matches!(e, LaunchEvent::PackagerSpawnFailed { .. }))
        );
    }

    #[tokio::test]
    async fn test_build_failure_skips_run() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(2, 0));
        let reporter = Arc::new(RecordingReporter::default());

        let err = orchestrator(&probe, &launcher, "linux")
            .with_reporter(reporter.clone())
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::BuildFailed { exit_code: Some(2) }));
        assert_eq!(err.terminal_state(), LaunchState::Aborted);
        assert_eq!(launcher.runs().len(), 1);

        let events = reporter.events.lock().unwrap();
        assert_eq!(
            events.last(),
            Some(&LaunchEvent::BuildFailed {
                stdout: b"out".to_vec(),
                stderr: b"err".to_vec(),
            })
        );
    }

    #[tokio::test]
    async fn test_run_receives_forwarded_flags_in_build_dir() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(0, 0));
        let config = BuildConfig::new(dir.path())
            .with_live_reload(true)
            .with_host("h")
            .with_port("p");

        orchestrator(&probe, &launcher, "linux")
            .launch(&config)
            .await
            .unwrap();

        let runs = launcher.runs();
        let build_dir = dir.path().join("ubuntu");
        assert_eq!(runs[0].arguments(), &["-c", "cmake . && make"]);
        assert_eq!(runs[0].working_dir(), Some(build_dir.as_path()));
        assert_eq!(runs[1].program(), build_dir.join("run-app.sh"));
        assert_eq!(
            runs[1].arguments(),
            &["--live-reload", "--host=h", "--port=p"]
        );
        assert_eq!(runs[1].working_dir(), Some(build_dir.as_path()));
    }

    #[tokio::test]
    async fn test_repeated_launch_rebuilds() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(0, 0));
        let orch = orchestrator(&probe, &launcher, "linux");
        let config = BuildConfig::new(dir.path());

        orch.launch(&config).await.unwrap();
        let first = launcher.runs();
        orch.launch(&config).await.unwrap();
        let all = launcher.runs();

        assert_eq!(all.len(), 4);
        assert_eq!(&all[..2], first.as_slice());
        assert_eq!(&all[2..], first.as_slice());
        assert_eq!(probe.calls(), 2);
    }

    #[tokio::test]
    async fn test_scenario_not_running_build_and_run_succeed() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::NotRunning));
        let launcher = Arc::new(MockLauncher::new(0, 0));

        let report = orchestrator(&probe, &launcher, "linux")
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap();

        assert_eq!(report.final_state, LaunchState::Done);
        assert!(report.server_spawned);
        assert_eq!(launcher.detached().len(), 1);
        assert_eq!(
            report.transitions,
            vec![
                LaunchState::Idle,
                LaunchState::Probing,
                LaunchState::SpawningServer,
                LaunchState::Building,
                LaunchState::Running,
                LaunchState::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_scenario_running_and_run_fails() {
        let dir = project();
        let probe = Arc::new(MockProbe::new(ServerState::Running));
        let launcher = Arc::new(MockLauncher::new(0, 1));
        let reporter = Arc::new(RecordingReporter::default());

        let err = orchestrator(&probe, &launcher, "linux")
            .with_reporter(reporter.clone())
            .launch(&BuildConfig::new(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::RunFailed { exit_code: Some(1) }));
        assert_eq!(err.terminal_state(), LaunchState::Aborted);
        assert!(launcher.detached().is_empty());
        assert_eq!(launcher.runs().len(), 2);

        let events = reporter.events.lock().unwrap();
        assert_eq!(
            events.as_slice(),
            &[
                LaunchEvent::PackagerState(ServerState::Running),
                LaunchEvent::Building,
                LaunchEvent::StartingApp,
                LaunchEvent::RunFailed {
                    stdout: b"out".to_vec(),
                    stderr: b"err".to_vec(),
                },
            ]
        );
    }
}
