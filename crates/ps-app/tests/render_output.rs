use ps_app::{
    EstimateReport, InstantPacer, RunMode, SessionController, estimate_now, render_page_html,
    render_results_html, render_results_text,
};
use ps_controls::{PlantKind, PlantModel};
use ps_core::GainTriple;

fn reference_report() -> EstimateReport {
    estimate_now(
        &PlantModel::default_for(PlantKind::FirstOrder),
        GainTriple::new(1.2, 0.6, 0.0).unwrap(),
    )
    .unwrap()
}

#[test]
fn html_table_has_a_row_per_metric() {
    let html = render_results_html(&reference_report());
    assert_eq!(html.matches("<tr data-key=").count(), 6);
    assert!(html.contains(
        "<tr data-key=\"settlingTime\"><td>Settling time</td><td>4.44</td><td>s</td></tr>"
    ));
    assert!(html.contains("<td>20.5</td><td>%</td>"));
    assert!(html.contains("class=\"notice\""));
}

#[test]
fn text_table_lists_metrics_in_order() {
    let text = render_results_text(&reference_report());
    let settling = text.find("Settling time").unwrap();
    let ise = text.find("ISE").unwrap();
    assert!(settling < ise);
    assert!(text.contains("13.16"));
    assert!(text.contains("Note: Heuristic estimate"));
}

#[test]
fn page_escapes_workbench_name() {
    let mut workbench = ps_project::Workbench::default();
    workbench.name = "<script>alert(1)</script>".to_string();
    let mut session = SessionController::new(workbench);
    session
        .run_blocking(RunMode::Simulate, &mut InstantPacer::default(), None)
        .unwrap();

    let html = render_page_html(&session.view());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("Status: Done"));
    assert!(html.contains("<ul class=\"status\">"));
}

#[test]
fn page_without_report_says_so() {
    let session = SessionController::default();
    let html = render_page_html(&session.view());
    assert!(html.contains("No results yet."));
}

#[test]
fn report_serializes_metrics_in_order() {
    let json = serde_json::to_value(reference_report()).unwrap();
    assert_eq!(json["mode"], "simulate");
    assert_eq!(json["plant"]["type"], "first_order");
    assert_eq!(json["metrics"]["ise"]["value"], "7.90");
    assert_eq!(json["heuristic"], true);
}
