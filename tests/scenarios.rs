use medoids::{Clustering, DistanceMatrix, Error, KMedoids};

/// A–B and C–D are 1 apart, every cross pair is 10.
fn two_pairs() -> DistanceMatrix {
    DistanceMatrix::new(vec![
        vec![0.0, 1.0, 10.0, 10.0],
        vec![1.0, 0.0, 10.0, 10.0],
        vec![10.0, 10.0, 0.0, 1.0],
        vec![10.0, 10.0, 1.0, 0.0],
    ])
    .unwrap()
}

/// Travel times (seconds) between six stops, three on each side of a river.
fn river() -> DistanceMatrix {
    DistanceMatrix::from_lower_triangle(vec![
        vec![],
        vec![120.0],
        vec![180.0, 90.0],
        vec![900.0, 840.0, 960.0],
        vec![1020.0, 930.0, 870.0, 150.0],
        vec![980.0, 900.0, 910.0, 100.0, 130.0],
    ])
    .unwrap()
}

#[test]
fn scenario_two_pairs() {
    let m = two_pairs();
    let fit = KMedoids::new(2).fit(&m).unwrap();

    let mut groups: Vec<Vec<usize>> = fit.clusters().iter().map(|c| c.members.clone()).collect();
    groups.sort();
    assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);

    for cluster in fit.clusters() {
        assert!(cluster.members.contains(&cluster.medoid));
    }
    assert_eq!(fit.cost(), 2.0);

    let names = ["A", "B", "C", "D"];
    for cluster in fit.labeled(&names).unwrap() {
        assert!(cluster.members.contains(&cluster.medoid));
    }
}

#[test]
fn scenario_k_equals_n() {
    let m = river();
    let fit = KMedoids::new(6).fit(&m).unwrap();

    assert_eq!(fit.cost(), 0.0);
    for cluster in fit.clusters() {
        assert_eq!(cluster.members, vec![cluster.medoid]);
    }
    let mut medoids = fit.medoids();
    medoids.sort_unstable();
    assert_eq!(medoids, (0..6).collect::<Vec<_>>());
}

#[test]
fn scenario_single_cluster_is_one_median() {
    let m = river();
    let fit = KMedoids::new(1).fit(&m).unwrap();

    assert_eq!(fit.clusters().len(), 1);
    assert_eq!(fit.clusters()[0].members, (0..6).collect::<Vec<_>>());

    let best = (0..6)
        .map(|i| m.row_sum(i))
        .fold(f64::INFINITY, f64::min);
    assert_eq!(fit.cost(), best);
    assert_eq!(m.row_sum(fit.medoids()[0]), best);
}

#[test]
fn scenario_zero_row_is_degenerate() {
    // Item 2 sits at distance 0 from everything.
    let m = DistanceMatrix::new(vec![
        vec![0.0, 5.0, 0.0],
        vec![5.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ])
    .unwrap();

    let result = KMedoids::new(2).fit(&m);
    assert!(matches!(result, Err(Error::DegenerateInput { item: 2 })));
}

#[test]
fn river_banks_are_separated() {
    let labels = KMedoids::new(2).fit_predict(&river()).unwrap();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[1], labels[2]);
    assert_eq!(labels[3], labels[4]);
    assert_eq!(labels[4], labels[5]);
    assert_ne!(labels[0], labels[3]);
}

#[test]
fn snapshots_trace_the_run() {
    let m = river();
    let snapshots: Vec<_> = KMedoids::new(2).refine(&m).unwrap().collect();
    let fit = KMedoids::new(2).fit(&m).unwrap();

    assert_eq!(snapshots, fit.history());
    assert_eq!(snapshots[0].iteration, 0);
    for snapshot in &snapshots {
        let total: usize = snapshot.clusters.iter().map(|c| c.members.len()).sum();
        assert_eq!(total, 6);
    }
}

#[test]
fn external_source_failure_is_reported() {
    let result = DistanceMatrix::try_from_fn(3, |i, j| {
        if (i, j) == (2, 1) {
            Err(format!("no route between {i} and {j}"))
        } else {
            Ok(60.0)
        }
    });
    assert!(matches!(result, Err(Error::Other(msg)) if msg == "no route between 2 and 1"));
}
