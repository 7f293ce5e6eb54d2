//! Writes a synthetic launch dataset to `data/generated_launches.{csv,parquet}`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Site name, share of launches, success probability, typical payload (kg).
const SITES: [(&str, f64, f64, f64); 4] = [
    ("CCAFS LC-40", 0.46, 0.27, 2800.0),
    ("CCAFS SLC-40", 0.13, 0.43, 4500.0),
    ("KSC LC-39A", 0.23, 0.77, 5200.0),
    ("VAFB SLC-4E", 0.18, 0.40, 6000.0),
];

const LAUNCHES: usize = 56;
const MAX_PAYLOAD: f64 = 9600.0;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick a site index according to the launch shares.
    fn site(&mut self) -> usize {
        let mut u = self.next_f64();
        for (i, (_, share, _, _)) in SITES.iter().enumerate() {
            if u < *share {
                return i;
            }
            u -= share;
        }
        SITES.len() - 1
    }
}

struct Launch {
    flight: i64,
    site: &'static str,
    payload: f64,
    class: i64,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (0..LAUNCHES)
        .map(|i| {
            let (site, _, success_rate, typical_payload) = SITES[rng.site()];
            // Later flights succeed more often.
            let learning = i as f64 / LAUNCHES as f64 * 0.3;
            let class = i64::from(rng.next_f64() < success_rate + learning);
            let payload = rng
                .gauss(typical_payload, 2000.0)
                .clamp(0.0, MAX_PAYLOAD)
                .round();
            Launch {
                flight: i as i64 + 1,
                site,
                payload,
                class,
            }
        })
        .collect()
}

fn write_csv(path: &Path, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["Flight Number", "Launch Site", "class", "Payload Mass (kg)"])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            l.payload.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let dir = Path::new("data");
    std::fs::create_dir_all(dir).context("creating data directory")?;

    let csv_path = dir.join("generated_launches.csv");
    let parquet_path = dir.join("generated_launches.parquet");
    write_csv(&csv_path, &launches)?;
    write_parquet(&parquet_path, &launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successes) to {} and {}",
        launches.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
