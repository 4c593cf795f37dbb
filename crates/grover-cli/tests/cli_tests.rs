//! CLI argument parsing and command tests.
//!
//! Parsing goes through clap's `try_parse_from`; commands run against a
//! seeded simulator in a temporary output directory.

// ============================================================================
// Argument parsing
// ============================================================================

mod parsing {
    use std::path::PathBuf;

    use clap::Parser;
    use grover_cli::{Cli, Commands, StrategyArg};
    use grover_search::{DEFAULT_SHOTS, Estimation, IterationStrategy};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("grover-sim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_subcommand_runs_everything() {
        let cli = parse(&["--shots", "100", "--seed", "1", "--out-dir", "out"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.options.shots, 100);
        assert_eq!(cli.options.seed, 1);
        assert_eq!(cli.options.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_verbosity_maps_to_filter() {
        assert_eq!(parse(&["--seed", "1"]).log_filter(), "warn");
        assert_eq!(parse(&["-v", "all"]).log_filter(), "info");
        assert_eq!(parse(&["-vv", "all"]).log_filter(), "debug");
        assert_eq!(parse(&["-vvvv", "all"]).log_filter(), "trace");
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["sanity", "--exact", "--seed", "9"]);
        assert!(matches!(cli.command, Some(Commands::Sanity)));
        assert_eq!(cli.options.estimation(), Estimation::Exact);
        assert_eq!(cli.options.seed, 9);
    }

    #[test]
    fn test_sampled_estimation_uses_shots() {
        let cli = parse(&["--shots", "256", "sanity"]);
        assert_eq!(cli.options.estimation(), Estimation::Sampled { shots: 256 });
    }

    #[test]
    fn test_oscillation_defaults() {
        match parse(&["oscillations"]).command {
            Some(Commands::Oscillations {
                qubits,
                marked_counts,
                max_iterations,
            }) => {
                assert_eq!(qubits, 8);
                assert_eq!(marked_counts, vec![1, 4, 16]);
                assert_eq!(max_iterations, 16);
            }
            other => panic!("Expected oscillations, got {other:?}"),
        }
    }

    #[test]
    fn test_marked_values_are_comma_separated() {
        match parse(&["run", "-n", "5", "--marked", "3,17,30", "-k", "2"]).command {
            Some(Commands::Run {
                qubits,
                marked,
                iterations,
            }) => {
                assert_eq!(qubits, 5);
                assert_eq!(marked, vec![3, 17, 30]);
                assert_eq!(iterations, Some(2));
            }
            other => panic!("Expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_run_requires_marked_values() {
        assert!(Cli::try_parse_from(["grover-sim", "run", "-n", "4"]).is_err());
    }

    #[test]
    fn test_scaling_strategy_choice() {
        match parse(&["scaling", "--strategy", "local"]).command {
            Some(Commands::Scaling {
                strategy,
                threshold,
            }) => {
                assert_eq!(strategy, StrategyArg::Local);
                assert_eq!(
                    strategy.into_strategy(threshold),
                    IterationStrategy::LocalSearch
                );
            }
            other => panic!("Expected scaling, got {other:?}"),
        }
        assert!(Cli::try_parse_from(["grover-sim", "scaling", "--strategy", "magic"]).is_err());
    }

    #[test]
    fn test_default_shots() {
        let cli = Cli::try_parse_from(["grover-sim", "--shots", &DEFAULT_SHOTS.to_string()])
            .unwrap();
        assert_eq!(cli.options.shots, 4096);
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use std::path::Path;

    use grover_cli::commands::{self, Session, all, diagram, oscillations, run, scaling, unknown};
    use grover_cli::{Cli, GlobalOptions, Report};
    use grover_search::{Estimation, IterationStrategy, SearchProblem, marked_fraction};

    use clap::Parser;

    fn options(dir: &Path) -> GlobalOptions {
        GlobalOptions {
            shots: 1024,
            seed: 42,
            out_dir: dir.to_path_buf(),
            exact: true,
        }
    }

    #[test]
    fn test_session_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let session = Session::new(&options(&nested)).unwrap();
        assert!(nested.is_dir());
        assert_eq!(session.executor.estimation(), Estimation::Exact);
        assert_eq!(session.output_path("x.svg"), nested.join("x.svg"));
    }

    #[test]
    fn test_diagram_writes_text_and_image() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(&options(dir.path())).unwrap();
        let files = diagram::execute(&session, 4, &[3], 2, None).unwrap();
        assert_eq!(files, vec!["circuit_demo.txt", "circuit_demo.svg"]);

        let text = std::fs::read_to_string(dir.path().join("circuit_demo.txt")).unwrap();
        assert!(text.contains("q[0]: "));
        assert!(text.contains("anc[0]: "));
        assert_eq!(text.matches('O').count(), 2);
        let svg = std::fs::read_to_string(dir.path().join("circuit_demo.svg")).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_diagram_rejects_out_of_range_value() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(&options(dir.path())).unwrap();
        let err = diagram::execute(&session, 2, &[4], 1, None).unwrap_err();
        assert!(err.to_string().contains("Invalid problem"));
    }

    #[tokio::test]
    async fn test_oscillations_chart_and_series() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&options(dir.path())).unwrap();
        let series = oscillations::execute(&mut session, 4, &[1, 2], 5)
            .await
            .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].marked.len(), 1);
        assert_eq!(series[1].marked.len(), 2);
        assert!(series.iter().all(|s| s.points.len() == 6));
        // k = 0 gives m / N exactly
        assert!((series[1].points[0].success_probability - 0.125).abs() < 1e-9);
        assert!(dir.path().join(oscillations::CHART_FILE).is_file());
    }

    #[tokio::test]
    async fn test_scaling_with_local_search() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&options(dir.path())).unwrap();
        let section = scaling::execute(&mut session, IterationStrategy::LocalSearch)
            .await
            .unwrap();

        assert_eq!(section.records.len(), scaling::GRID.len());
        let k_for = |n, m| {
            section
                .records
                .iter()
                .find(|r| r.num_qubits == n && r.num_marked == m)
                .map(|r| r.iterations)
        };
        assert_eq!(k_for(4, 1), Some(3));
        assert_eq!(k_for(8, 1), Some(12));
        assert_eq!(k_for(10, 1), Some(25));
        assert_eq!(k_for(8, 4), Some(6));

        let slopes: Vec<f64> = section.fits.iter().map(|f| f.fit.slope).collect();
        assert_eq!(slopes.len(), 2);
        assert!(slopes.iter().all(|s| (s - 1.0).abs() < 0.15));
        assert!(dir.path().join(scaling::CHART_FILE).is_file());
    }

    #[tokio::test]
    async fn test_unknown_m_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&options(dir.path())).unwrap();
        let summaries = unknown::execute(&mut session, 8, &[1, 4, 16], 0.95)
            .await
            .unwrap();

        let bounds: Vec<u64> = summaries.iter().map(|s| s.bound).collect();
        assert_eq!(bounds, vec![31, 19, 13]);
        for s in &summaries {
            let outcome = s.outcome.expect("threshold reachable at n = 8");
            assert!(outcome.k <= s.bound);
            assert!(outcome.success_probability >= 0.95);
        }
    }

    #[tokio::test]
    async fn test_all_writes_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&options(dir.path())).unwrap();
        let report = all::execute(&mut session).await.unwrap();

        for file in [
            "oscillations.svg",
            "scaling.svg",
            "circuit_demo.txt",
            "circuit_demo.svg",
            all::REPORT_FILE,
        ] {
            assert!(dir.path().join(file).is_file(), "missing {file}");
        }
        assert_eq!(report.artifacts.len(), 4);

        let on_disk = Report::read(&dir.path().join(all::REPORT_FILE)).unwrap();
        let sanity = on_disk.sanity.unwrap();
        assert_eq!(sanity.most_likely_outcome, 3);
        assert!(sanity.success_probability > 0.9);
        assert_eq!(on_disk.oscillations.len(), 3);
        assert_eq!(on_disk.unknown_m.len(), 3);
        assert_eq!(on_disk.seed, 42);
    }

    #[tokio::test]
    async fn test_sampled_run_reports_probability_of_its_own_histogram() {
        let dir = tempfile::tempdir().unwrap();
        let sampled = GlobalOptions {
            exact: false,
            ..options(dir.path())
        };
        let session = Session::new(&sampled).unwrap();
        let summary = run::execute(&session, 4, &[3], None, 512).await.unwrap();

        assert_eq!(summary.iterations, 3);
        assert_eq!(summary.outcomes.values().sum::<u64>(), 512);
        let problem = SearchProblem::new(4, [3]).unwrap();
        assert_eq!(
            summary.success_probability,
            marked_fraction(&summary.outcomes, &problem)
        );
    }

    #[tokio::test]
    async fn test_exact_run_reports_distribution_probability() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(&options(dir.path())).unwrap();
        let summary = run::execute(&session, 4, &[3], Some(3), 256).await.unwrap();
        assert!((summary.success_probability - 0.9613).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_dispatch_version_needs_no_session() {
        let cli = Cli::try_parse_from(["grover-sim", "version"]).unwrap();
        commands::dispatch(cli).await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_run_reports_bad_problem() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "grover-sim", "--out-dir", out, "run", "-n", "3", "--marked", "9",
        ])
        .unwrap();
        assert!(commands::dispatch(cli).await.is_err());
    }
}
