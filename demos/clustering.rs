//! K-medoids on a small table of driving times between Munich addresses.

use medoids::{DistanceMatrix, KMedoids};

fn main() {
    let addresses = [
        "Marienplatz",
        "Viktualienmarkt",
        "Odeonsplatz",
        "Olympiapark",
        "BMW Welt",
        "Nordfriedhof",
        "Ostbahnhof",
        "Haidhausen",
        "Giesing",
    ];

    // Driving time in seconds, lower triangle: row i holds d(i, 0..i).
    let matrix = DistanceMatrix::from_lower_triangle(vec![
        vec![],
        vec![180.0],
        vec![300.0, 420.0],
        vec![1080.0, 1140.0, 900.0],
        vec![1140.0, 1200.0, 960.0, 240.0],
        vec![960.0, 1020.0, 780.0, 480.0, 420.0],
        vec![720.0, 660.0, 840.0, 1320.0, 1380.0, 1140.0],
        vec![600.0, 540.0, 720.0, 1260.0, 1320.0, 1080.0, 240.0],
        vec![780.0, 660.0, 960.0, 1440.0, 1500.0, 1260.0, 360.0, 420.0],
    ])
    .expect("demo matrix is valid");

    println!(
        "{} addresses, {} pairwise travel-time queries",
        addresses.len(),
        DistanceMatrix::pair_count(addresses.len())
    );

    // --- Step-by-step ---
    let mut run = KMedoids::new(3).refine(&matrix).expect("valid parameters");
    for snapshot in run.by_ref() {
        println!("\n=== Step {} (cost {} s) ===", snapshot.iteration, snapshot.cost);
        for (id, cluster) in snapshot.clusters.iter().enumerate() {
            let members: Vec<&str> = cluster.members.iter().map(|&i| addresses[i]).collect();
            println!(
                "  cluster {} centered on {:16} => {:?}",
                id, addresses[cluster.medoid], members
            );
        }
    }

    // --- Final result ---
    let fit = run.finish();
    println!(
        "\nCost of optimised clustering into 3 clusters: {} seconds ({} refinements)",
        fit.cost(),
        fit.iterations()
    );
    for cluster in fit.labeled(&addresses).expect("one label per address") {
        println!("  {} <- {:?}", cluster.medoid, cluster.members);
    }
}
