use netgrow::attachment::attach_node;
use netgrow::demo::{
    simulate_growth, visualize_static, DrawOptions, SimulateOptions, VisualizeOptions,
};
use netgrow::layout::LayoutKind;
use netgrow::metrics::snapshot;
use netgrow::{GraphError, GraphStore, NetworkSimulation};
use rand::rngs::mock::StepRng;
use std::fs;
use std::path::Path;

fn draw_options(dir: &Path, layout: LayoutKind) -> DrawOptions {
    DrawOptions {
        output_dir: dir.to_path_buf(),
        layout,
        layout_iterations: 20,
        panel_width: 320,
        panel_height: 320,
    }
}

#[test]
fn test_default_simulation_records_every_step() {
    let mut sim = NetworkSimulation::seeded(30, 0.1, 2718).unwrap();
    sim.run(100).unwrap();

    assert_eq!(sim.history().len(), 100);
    let last = sim.history().last().unwrap();
    assert_eq!(*last, snapshot(sim.graph()).unwrap());
    assert_eq!(
        last.average_degree,
        2.0 * last.edge_count as f64 / last.node_count as f64
    );
}

#[test]
fn test_two_node_scenario_with_always_connect_source() {
    let mut graph = GraphStore::from_edges([0, 1], [(0, 1)]).unwrap();
    attach_node(&mut graph, &mut StepRng::new(0, 0)).unwrap();

    let nodes: Vec<_> = graph.nodes().collect();
    let edges: Vec<_> = graph.edges().into_iter().collect();
    assert_eq!(nodes, vec![0, 1, 2]);
    assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
}

#[test]
fn test_edgeless_graph_cannot_grow() {
    let mut graph = GraphStore::from_edges([0, 1, 2, 3], []).unwrap();
    let before: Vec<_> = graph.nodes().collect();

    let err = attach_node(&mut graph, &mut StepRng::new(0, 0)).unwrap_err();

    assert_eq!(err, GraphError::DegenerateGraph);
    assert_eq!(graph.nodes().collect::<Vec<_>>(), before);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_simulate_growth_writes_three_figures() {
    let dir = tempfile::tempdir().unwrap();
    let options = SimulateOptions {
        draw: draw_options(dir.path(), LayoutKind::Spring),
        initial_size: 30,
        initial_probability: 0.1,
        steps: 25,
        seed: 7,
    };

    let report = simulate_growth(&options).unwrap();

    assert_eq!(report.steps_run, 25);
    assert_eq!(report.final_metrics.map(|m| m.node_count), Some(55));
    let names: Vec<_> = report
        .figures
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["metrics.svg", "network.svg", "degree_distribution.svg"]
    );

    let metrics = fs::read_to_string(&report.figures[0]).unwrap();
    assert_eq!(metrics.matches("<polyline ").count(), 3);
    assert!(metrics.contains("Average Degree"));

    let network = fs::read_to_string(&report.figures[1]).unwrap();
    assert!(network.contains("<line "));
    assert!(network.contains("<circle "));

    let degrees = fs::read_to_string(&report.figures[2]).unwrap();
    assert!(degrees.contains("Degree Distribution"));
}

#[test]
fn test_simulate_growth_reports_invalid_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let options = SimulateOptions {
        draw: draw_options(dir.path(), LayoutKind::Circular),
        initial_size: 0,
        initial_probability: 0.1,
        steps: 5,
        seed: 1,
    };

    let err = simulate_growth(&options).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GraphError>(),
        Some(GraphError::InvalidParameter(_))
    ));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_visualize_static_draws_labeled_pair() {
    let dir = tempfile::tempdir().unwrap();
    let options = VisualizeOptions {
        draw: draw_options(&dir.path().join("nested"), LayoutKind::Spring),
        seed: 3,
    };

    let path = visualize_static(&options).unwrap();

    assert_eq!(path.file_name().unwrap(), "simple_graph.svg");
    let doc = fs::read_to_string(&path).unwrap();
    assert_eq!(doc.matches("<line ").count(), 1);
    assert_eq!(doc.matches("<circle ").count(), 2);
    assert!(doc.contains(">1</text>"));
    assert!(doc.contains(">2</text>"));
    assert!(doc.contains("Simple Graph Visualization"));
}
