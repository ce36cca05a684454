use shrink::{Algorithm, Shrink};

use std::sync::Arc;
use std::thread;

fn payload(seed: u8) -> Vec<u8> {
    (0..32 * 1024u32).map(|idx| ((idx / 7) as u8).wrapping_add(seed)).collect()
}

#[test]
fn should_share_context_between_threads() {
    for algorithm in Algorithm::all().iter().filter(|algorithm| algorithm.is_available()) {
        let ctx = Arc::new(Shrink::init(*algorithm, algorithm.levels()[0]).expect("available pair"));
        let expected: Vec<Vec<u8>> = (0..4).map(|seed| ctx.compress_to_vec(&payload(seed)).expect("compress")).collect();

        let workers: Vec<_> = (0..4u8).map(|seed| {
            let ctx = ctx.clone();
            thread::spawn(move || {
                let data = payload(seed);
                let mut result = Vec::new();
                for _ in 0..8 {
                    let compressed = ctx.compress_to_vec(&data).expect("compress");
                    let decompressed = ctx.decompress_to_vec(&compressed, data.len()).expect("decompress");
                    assert_eq!(decompressed, data);
                    result = compressed;
                }
                result
            })
        }).collect();

        for (seed, worker) in workers.into_iter().enumerate() {
            let compressed = worker.join().expect("worker to finish");
            assert_eq!(compressed, expected[seed], "{}", ctx.algorithm_name());
        }
    }
}
