mod common;

use campusnav_lib::{
    load_campus_map, plan_evacuation, plan_route, reference_campus, verify_symmetry,
    ConstraintStore, EvacuationRequest, RouteRequest, TimeOfDay,
};

#[test]
fn reference_campus_is_symmetric() {
    let graph = reference_campus();
    verify_symmetry(&graph).expect("symmetric");
    for (a, b, connection) in graph.edges() {
        assert_eq!(graph.connection(b, a), Some(connection), "{a} - {b}");
    }
}

#[test]
fn main_gate_to_hostel_in_the_morning() {
    let graph = reference_campus();
    let store = ConstraintStore::new();
    let plan = plan_route(&graph, &store, &RouteRequest::new("Main Gate", "Hostel"))
        .expect("valid request");

    assert_eq!(
        plan.path,
        vec!["Main Gate", "Admin Block", "Cafeteria", "Auditorium", "Hostel"]
    );
    assert_eq!(plan.distance, Some(830));
    assert_eq!(plan.hop_count(), 4);
    assert!(plan.visited.contains("Hostel"));
}

#[test]
fn route_cost_changes_with_time_of_day() {
    let graph = reference_campus();
    let store = ConstraintStore::new();
    let costs: Vec<_> = TimeOfDay::ALL
        .into_iter()
        .map(|time| {
            plan_route(&graph, &store, &RouteRequest::new("Main Gate", "Hostel").at(time))
                .expect("valid request")
                .distance
                .expect("reachable")
        })
        .collect();
    assert_eq!(costs[0], 830);
    assert!(costs.iter().all(|cost| *cost > 0));
    assert_ne!(costs[0], costs[2]);
}

#[test]
fn blocking_reroutes_around_the_closure() {
    let graph = reference_campus();
    let store = ConstraintStore::new();
    store
        .block_edge(&graph, "Cafeteria", "Admin Block")
        .expect("edge exists");

    let plan = plan_route(&graph, &store, &RouteRequest::new("Main Gate", "Hostel"))
        .expect("valid request");
    assert!(plan.is_reachable());
    assert!(plan
        .path
        .windows(2)
        .all(|pair| !(pair.contains(&"Cafeteria".to_string())
            && pair.contains(&"Admin Block".to_string()))));
}

#[test]
fn evacuation_from_lecture_hall_with_hazards() {
    let graph = reference_campus();
    let store = ConstraintStore::new();
    store.add_hazard(&graph, "Library").expect("known");
    store.add_hazard(&graph, "Computer Lab").expect("known");

    let route = plan_evacuation(&graph, &store, &EvacuationRequest::new("Lecture Hall"))
        .expect("exit reachable");
    assert_eq!(route.exit, "Sports Complex");
    assert_eq!(route.distance, 200);
}

#[test]
fn exits_cannot_be_marked_hazardous() {
    let graph = reference_campus();
    let store = ConstraintStore::new();
    assert!(!store.add_hazard(&graph, "Sports Complex").expect("known"));
    assert!(store.list_hazards().is_empty());
}

#[test]
fn loads_map_written_to_disk() {
    let (_dir, path) = common::reference_map_file();
    let graph = load_campus_map(&path).expect("map loads");
    assert_eq!(graph.len(), 9);
    assert_eq!(graph.edge_count(), 12);
    assert_eq!(graph.exits(), ["Main Gate", "Sports Complex"]);

    let store = ConstraintStore::new();
    let plan = plan_route(&graph, &store, &RouteRequest::new("Main Gate", "Hostel"))
        .expect("valid request");
    assert_eq!(plan.distance, Some(830));
}
