use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SEASON: u16 = 2023;

/// (passer, dropbacks, completion rate, mean EPA)
const PASSERS: [(&str, usize, f64, f64); 8] = [
    ("P.Mahomes", 140, 0.67, 0.18),
    ("J.Allen", 130, 0.66, 0.16),
    ("L.Jackson", 110, 0.67, 0.17),
    ("T.Tagovailoa", 120, 0.69, 0.19),
    ("B.Purdy", 105, 0.70, 0.27),
    ("Z.Wilson", 60, 0.60, -0.12),
    ("J.Backup", 9, 0.55, -0.20),
    ("T.Trickplay", 3, 0.66, 0.40),
];

const COVERAGES: [&str; 7] = [
    "COVER_0", "COVER_1", "COVER_2", "COVER_3", "COVER_4", "COVER_6", "2_MAN",
];

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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Column buffers in nflverse layout: indicators are 0/1 doubles.
#[derive(Default)]
struct Columns {
    passer: Vec<Option<String>>,
    pass: Vec<Option<f64>>,
    play_type: Vec<Option<String>>,
    qb_kneel: Vec<Option<f64>>,
    qb_spike: Vec<Option<f64>>,
    qb_scramble: Vec<Option<f64>>,
    complete_pass: Vec<Option<f64>>,
    epa: Vec<Option<f64>>,
    wpa: Vec<Option<f64>>,
    air_yards: Vec<Option<f64>>,
    time_to_throw: Vec<Option<f64>>,
    coverage: Vec<Option<String>>,
    man_zone: Vec<Option<String>>,
    defenders_in_box: Vec<Option<f64>>,
    pass_rushers: Vec<Option<f64>>,
    was_pressure: Vec<Option<bool>>,
}

fn flag(b: bool) -> Option<f64> {
    Some(if b { 1.0 } else { 0.0 })
}

impl Columns {
    fn push_dropback(&mut self, rng: &mut SimpleRng, passer: &str, completion: f64, mean_epa: f64) {
        let roll = rng.next_f64();
        let (play_type, kneel, spike) = match roll {
            r if r < 0.03 => ("no_play", false, false),
            r if r < 0.04 => ("qb_spike", false, true),
            r if r < 0.05 => ("qb_kneel", true, false),
            _ => ("pass", false, false),
        };
        let scramble = play_type == "pass" && rng.chance(0.06);
        let rushers = 3.0 + (rng.next_u64() % 4) as f64;
        let pressured = rng.chance(0.12 + 0.06 * (rushers - 3.0));
        let pressure_penalty = if pressured { 0.15 } else { 0.0 };
        let complete = !scramble && play_type == "pass" && rng.chance(completion - pressure_penalty);
        let coverage = *rng.pick(&COVERAGES);
        let man_zone = if matches!(coverage, "COVER_0" | "COVER_1" | "2_MAN") {
            "MAN_COVERAGE"
        } else {
            "ZONE_COVERAGE"
        };
        let tracked = rng.chance(0.9);

        self.passer.push(Some(passer.to_string()));
        self.pass.push(flag(!matches!(play_type, "qb_kneel")));
        self.play_type.push(Some(play_type.to_string()));
        self.qb_kneel.push(flag(kneel));
        self.qb_spike.push(flag(spike));
        self.qb_scramble.push(flag(scramble));
        self.complete_pass.push(flag(complete));
        self.epa.push(Some(rng.gauss(mean_epa + if complete { 0.5 } else { -0.6 }, 0.9)));
        self.wpa.push(Some(rng.gauss(0.0, 0.03)));
        self.air_yards
            .push((!scramble).then(|| rng.gauss(8.0, 7.0).round()));
        self.time_to_throw
            .push(tracked.then(|| rng.gauss(2.8, 0.5).max(1.2)));
        self.coverage.push(tracked.then(|| coverage.to_string()));
        self.man_zone.push(tracked.then(|| man_zone.to_string()));
        self.defenders_in_box
            .push(tracked.then(|| 5.0 + (rng.next_u64() % 4) as f64));
        self.pass_rushers.push(tracked.then_some(rushers));
        self.was_pressure.push(tracked.then_some(pressured));
    }

    /// A designed run: present in real files, removed by the base filter.
    fn push_run(&mut self, rng: &mut SimpleRng) {
        self.passer.push(None);
        self.pass.push(flag(false));
        self.play_type.push(Some("run".to_string()));
        self.qb_kneel.push(flag(false));
        self.qb_spike.push(flag(false));
        self.qb_scramble.push(flag(false));
        self.complete_pass.push(flag(false));
        self.epa.push(Some(rng.gauss(-0.05, 0.8)));
        self.wpa.push(Some(rng.gauss(0.0, 0.02)));
        self.air_yards.push(None);
        self.time_to_throw.push(None);
        self.coverage.push(None);
        self.man_zone.push(None);
        self.defenders_in_box.push(Some(7.0));
        self.pass_rushers.push(None);
        self.was_pressure.push(None);
    }

    fn into_batch(self) -> Result<RecordBatch> {
        let text = |v: Vec<Option<String>>| -> ArrayRef { Arc::new(StringArray::from(v)) };
        let num = |v: Vec<Option<f64>>| -> ArrayRef { Arc::new(Float64Array::from(v)) };

        let fields: Vec<(&str, ArrayRef)> = vec![
            ("passer", text(self.passer)),
            ("pass", num(self.pass)),
            ("play_type", text(self.play_type)),
            ("qb_kneel", num(self.qb_kneel)),
            ("qb_spike", num(self.qb_spike)),
            ("qb_scramble", num(self.qb_scramble)),
            ("complete_pass", num(self.complete_pass)),
            ("epa", num(self.epa)),
            ("wpa", num(self.wpa)),
            ("air_yards", num(self.air_yards)),
            ("time_to_throw", num(self.time_to_throw)),
            ("defense_coverage_type", text(self.coverage)),
            ("defense_man_zone_type", text(self.man_zone)),
            ("defenders_in_box", num(self.defenders_in_box)),
            ("number_of_pass_rushers", num(self.pass_rushers)),
            (
                "was_pressure",
                Arc::new(BooleanArray::from(self.was_pressure)) as ArrayRef,
            ),
        ];

        let schema = Schema::new(
            fields
                .iter()
                .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
                .collect::<Vec<_>>(),
        );
        let arrays = fields.into_iter().map(|(_, array)| array).collect();
        RecordBatch::try_new(Arc::new(schema), arrays).context("assembling record batch")
    }
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("data"), PathBuf::from);
    let mut rng = SimpleRng::new(42);
    let mut columns = Columns::default();

    let mut dropbacks = 0;
    for &(passer, n, completion, mean_epa) in &PASSERS {
        for _ in 0..n {
            columns.push_dropback(&mut rng, passer, completion, mean_epa);
            dropbacks += 1;
            if rng.chance(0.8) {
                columns.push_run(&mut rng);
            }
        }
    }
    let batch = columns.into_batch()?;
    let rows = batch.num_rows();

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let output_path = out_dir.join(format!("play_by_play_{SEASON}.parquet"));
    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {rows} plays ({dropbacks} dropbacks, {} passers) to {}",
        PASSERS.len(),
        output_path.display()
    );
    Ok(())
}
