use bin::executor::{execute, render_summary, ExecError, RotateExecArgs};
use clap::Parser;
use matrix::{LaunchConfig, RotateError, Strategy};

fn parse(extra: &[&str]) -> RotateExecArgs {
    RotateExecArgs::parse_from(std::iter::once("rotate-exec").chain(extra.iter().copied()))
}

#[test]
fn test_default_run_matches_reference_output() {
    let args = parse(&[]);
    assert_eq!(args.rows, 7);
    assert_eq!(args.cols, 25);
    assert_eq!(args.launch_config(), LaunchConfig::new(1, 25));

    let summary = execute(&args).unwrap();
    assert_eq!(summary.strategy, Strategy::ColumnTasks);
    assert_eq!(summary.report.active_tasks, 25);
    assert_eq!(summary.report.idle_tasks, 0);
    assert_eq!(summary.rotated.column(24).unwrap(), vec![7, 1, 2, 3, 4, 5, 6]);
    assert_eq!(summary.original.column(24).unwrap(), vec![1, 2, 3, 4, 5, 6, 7]);

    let text = render_summary(&summary, false);
    assert!(text.contains("KERNEL of 1 block(s) with 25 THREADS:"));
    assert!(text.contains("ORIGINAL MATRIX:\n1 1 1"));
    assert!(text.contains("FINAL MATRIX:\n7 7 7"));
}

#[test]
fn test_quiet_run_with_custom_grid() {
    let args = parse(&[
        "--rows", "4", "--cols", "10", "-t", "8", "-b", "3", "-n", "2", "-s", "row-copy",
        "-w", "2", "-q",
    ]);
    let summary = execute(&args).unwrap();

    assert_eq!(summary.strategy, Strategy::RowCopy);
    assert_eq!(summary.report.active_tasks, 10);
    assert_eq!(summary.report.idle_tasks, 14);
    assert_eq!(summary.rotated.row(0).unwrap(), &[3; 10]);

    let text = render_summary(&summary, true);
    assert!(!text.contains("MATRIX"));
    assert!(text.contains("DEVICE 0: "));
}

#[test]
fn test_bad_inputs_are_reported() {
    assert!(matches!(
        execute(&parse(&["-s", "warp"])),
        Err(ExecError::Rotate(RotateError::UnknownStrategy(_)))
    ));
    assert!(matches!(
        execute(&parse(&["--rows", "0"])),
        Err(ExecError::Rotate(RotateError::InvalidDimensions { rows: 0, cols: 25 }))
    ));
    assert!(matches!(
        execute(&parse(&["-t", "4", "-b", "2"])),
        Err(ExecError::Rotate(RotateError::InvalidLaunch { .. }))
    ));
}
