use kmeans_stepper::*;
use rand::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let (sample_cnt, k) = (200, 3);

    // Generate a new dataset, uniformly distributed over [0,100)^2
    let mut rnd = StdRng::seed_from_u64(1337);
    let samples: Vec<[f64; 2]> = (0..sample_cnt).map(|_| [rnd.gen_range(0.0..100.0), rnd.gen_range(0.0..100.0)]).collect();

    let iteration_done = |s: &KMeansState<f64>, nr: usize, new_distsum: f64|
        println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
            nr, s.distsum, new_distsum, s.distsum - new_distsum);

    for method in [InitMethod::Random, InitMethod::FarthestFirst, InitMethod::KMeansPlusPlus] {
        println!("=== {} ===", method);
        let conf = KMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(42))
            .init_done(&|s| println!("Initialization completed: {:?}", s.centroids))
            .iteration_done(&iteration_done)
            .build();
        let mut kmean = KMeans::with_config(k, method, EuclideanDistance, conf).expect("k >= 1");
        kmean.set_data(&samples).expect("valid dataset");

        // Step through the first iterations, then run the rest
        for _ in 0..2 {
            if !kmean.run_step() {
                break;
            }
        }
        let iterations = kmean.run_to_convergence(DEFAULT_MAX_ITER);
        if kmean.is_converged() {
            println!("Converged after {} more iterations", iterations);
        } else {
            println!("Stopped after {} more iterations without convergence", iterations);
        }
        println!("Centroids: {:?}", kmean.centroids());
        println!("Cluster sizes: {:?}", kmean.clusters().iter().map(|c| c.len()).collect::<Vec<_>>());
    }

    // Manual initialization: pick centroids one by one, like clicks on a chart
    println!("=== {} ===", InitMethod::Manual);
    let mut kmean = KMeans::new(k, InitMethod::Manual).expect("k >= 1");
    kmean.set_data(&samples).expect("valid dataset");
    for pick in [[10.0, 10.0], [50.0, 90.0], [90.0, 10.0], [50.0, 50.0]] {
        if kmean.accepts_manual_centroids() {
            kmean.add_manual_centroid(&pick).expect("2D pick");
            println!("{} more needed", kmean.remaining_manual_centroids());
        }
    }
    let iterations = kmean.run_to_convergence(DEFAULT_MAX_ITER);
    println!("Converged: {} after {} iterations", kmean.is_converged(), iterations);
    println!("Centroids: {:?}", kmean.centroids());
}
