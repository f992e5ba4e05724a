use clap::Parser;
use dxf2gcode::cli::{render_summary, run, Cli};
use std::path::Path;

// Two 3D lines, the first descending, with a spline between them
const PART_DXF: &str = "0
SECTION
2
ENTITIES
0
LINE
8
0
10
0.0
20
0.0
30
2.0
11
20.0
21
0.0
31
0.0
0
SPLINE
8
0
0
LINE
8
0
10
20.0
20
10.0
30
0.0
11
0.0
21
10.0
31
1.0
0
ENDSEC
0
EOF
";

fn write_config(dir: &Path, body: &str) -> String {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().to_string()
}

fn write_input(dir: &Path) -> String {
    let path = dir.join("part.dxf");
    std::fs::write(&path, PART_DXF).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[conversion]\nextrusion_per_unit = 0.5\ncenter_x = 10.0\ncenter_y = 10.0\n",
    );
    let input = write_input(dir.path());

    let cli = Cli::try_parse_from([
        "dxf2gcode",
        "-c",
        config.as_str(),
        "-E",
        "2",
        "--center-y",
        "-20",
        input.as_str(),
    ])
    .unwrap();
    let resolved = cli.resolve_config().unwrap();
    assert_eq!(resolved.conversion.extrusion_per_unit, 2.0);
    assert_eq!(resolved.conversion.center_x, 10.0);
    assert_eq!(resolved.conversion.center_y, -20.0);
    assert_eq!(resolved.conversion.feed_rate, None);
}

#[test]
fn test_run_writes_gcode_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[conversion]\ncenter_x = 100.0\ncenter_y = 100.0\n");
    let input = write_input(dir.path());

    let cli = Cli::try_parse_from([
        "dxf2gcode",
        "-c",
        config.as_str(),
        "-F",
        "1200",
        input.as_str(),
    ])
    .unwrap();
    let outcome = run(&cli).unwrap();

    assert_eq!(outcome.output_path, dir.path().join("part.dxf.gcode"));
    let gcode = std::fs::read_to_string(&outcome.output_path).unwrap();
    let lines: Vec<&str> = gcode.lines().collect();
    assert_eq!(
        lines,
        vec![
            "G21 ;metric values",
            "G90 ;absolute positioning",
            "M82 ;set extruder to absolute mode",
            "G1 F1200.000000",
            "G1 X110.000000 Y95.000000 Z0.000000",
            "G1 X90.000000 Y95.000000 Z2.000000 E20.099751",
            "G1 X110.000000 Y105.000000 Z0.000000",
            "G1 X90.000000 Y105.000000 Z1.000000 E40.124736",
        ]
    );

    let summary = render_summary(&cli, &outcome).unwrap();
    assert!(summary.starts_with("This tool does not yet convert SPLINEs!\n"));
    assert!(summary.contains("G-code written to "));
    assert!(summary.contains("PRINT INFO:\nX min: 0.000000; X max: 20.000000\n"));
    assert!(summary.contains("Z min: 0.000000; Z max: 2.000000"));
}

#[test]
fn test_each_curve_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let input = write_input(dir.path());

    let cli = Cli::try_parse_from(["dxf2gcode", "-c", config.as_str(), input.as_str()]).unwrap();
    let outcome = run(&cli).unwrap();
    assert_eq!(outcome.report.notices.len(), 1);

    let summary = render_summary(&cli, &outcome).unwrap();
    assert_eq!(
        summary.matches("This tool does not yet convert SPLINEs!").count(),
        1
    );
}

#[test]
fn test_explicit_output_and_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[output]\nprint_summary = false\n");
    let input = write_input(dir.path());
    let output = dir.path().join("out.gcode");

    let cli = Cli::try_parse_from([
        "dxf2gcode",
        "-c",
        config.as_str(),
        "-o",
        output.to_str().unwrap(),
        "--json",
        input.as_str(),
    ])
    .unwrap();
    let outcome = run(&cli).unwrap();
    assert!(output.is_file());
    assert_eq!(outcome.report.polyline_count, 2);

    let summary = render_summary(&cli, &outcome).unwrap();
    assert!(summary.contains("\"polyline_count\": 2"));
    assert!(!summary.contains("PRINT INFO"));
}

#[test]
fn test_bad_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let input = dir.path().join("broken.dxf");
    std::fs::write(&input, "not a dxf document at all").unwrap();

    let cli = Cli::try_parse_from([
        "dxf2gcode",
        "-c",
        config.as_str(),
        input.to_str().unwrap(),
    ])
    .unwrap();
    assert!(run(&cli).is_err());
    assert!(!dir.path().join("broken.dxf.gcode").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let input = dir.path().join("absent.dxf");

    let cli = Cli::try_parse_from([
        "dxf2gcode",
        "-c",
        config.as_str(),
        input.to_str().unwrap(),
    ])
    .unwrap();
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_negative_extrusion_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let input = write_input(dir.path());

    let cli = Cli::try_parse_from([
        "dxf2gcode",
        "-c",
        config.as_str(),
        "--extrusion=-1",
        input.as_str(),
    ])
    .unwrap();
    assert!(run(&cli).is_err());
    assert!(!dir.path().join("part.dxf.gcode").exists());
}

#[test]
fn test_input_is_required() {
    assert!(Cli::try_parse_from(["dxf2gcode"]).is_err());
}
