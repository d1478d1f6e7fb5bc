use std::path::Path;

use topo_canon::data::loader::write_records;
use topo_canon::Record;

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// One survey shot before shuffling.
struct Shot {
    point: usize,
    code: String,
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    // (type, counter, points, attributes on the first point)
    let polylines: [(&str, u32, usize, &str); 6] = [
        ("59", 1, 6, "@AS@C"),
        ("59", 2, 4, ""),
        ("Muro", 1, 5, "@H2"),
        ("Muro", 2, 3, ""),
        ("10", 7, 4, ""),
        ("A&B", 1, 3, "@X"),
    ];
    let isolated = ["99", "Arbol@D", "Pozo", "7", "Arbol@P"];

    let mut shots = Vec::new();
    let mut point = 1;
    for (ty, counter, len, attrs) in polylines {
        for i in 0..len {
            let mut code = format!("{ty}&{counter}");
            if i + 1 == len {
                code.push(if rng.below(2) == 0 { 'F' } else { 'f' });
            }
            if i == 0 {
                code.push_str(attrs);
            }
            shots.push(Shot { point, code });
            point += 1;
        }
    }
    for code in isolated {
        shots.push(Shot {
            point,
            code: code.to_string(),
        });
        point += 1;
    }

    // Fisher-Yates, so polyline points end up scattered through the file
    for i in (1..shots.len()).rev() {
        let j = rng.below(i + 1);
        shots.swap(i, j);
    }

    let output_path = "sample_survey.txt";
    let records: Vec<Record> = shots
        .iter()
        .enumerate()
        .map(|(line, shot)| {
            let station = 1 + shot.point / 10;
            let east = 500_000.0 + rng.next_f64() * 250.0;
            let north = 4_400_000.0 + rng.next_f64() * 250.0;
            let elev = 600.0 + rng.next_f64() * 15.0;
            Record::new(
                line + 1,
                vec![
                    format!("E{station}"),
                    shot.point.to_string(),
                    format!("{east:.3}"),
                    format!("{north:.3}"),
                    format!("{elev:.3}"),
                    shot.code.clone(),
                ],
            )
        })
        .collect();
    write_records(Path::new(output_path), &records, b',')?;

    println!("Wrote {} shots to {output_path}", shots.len());
    Ok(())
}
