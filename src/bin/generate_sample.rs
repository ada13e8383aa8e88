use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (artist, tracks, albums, weight); weight skews the play distribution
/// so the rankings have a clear shape.
const ARTISTS: &[(&str, &[&str], &[&str], u32)] = &[
    (
        "BTS",
        &[
            "Magic Shop",
            "Mikrokosmos",
            "Spring Day",
            "Euphoria",
            "Dynamite",
            "Butter",
            "Black Swan",
            "Pied Piper",
        ],
        &["Love Yourself: Tear", "Map of the Soul: 7", "BE", "Wings"],
        6,
    ),
    (
        "IU",
        &["Celebrity", "Lilac", "Blueming", "Palette"],
        &["Lilac", "Palette"],
        3,
    ),
    (
        "NewJeans",
        &["Ditto", "OMG", "Hype Boy"],
        &["NewJeans 1st EP", "OMG"],
        2,
    ),
    (
        "Taylor Swift",
        &["Anti-Hero", "Cruel Summer", "Style"],
        &["Midnights", "Lover", "1989"],
        2,
    ),
    ("Agust D", &["Daechwita", "Haegeum"], &["D-2", "D-Day"], 1),
];

const YEARS: &[i64] = &[2019, 2020, 2021, 2022, 2023, 2024];

/// Mostly home listening, with a few trips abroad.
const COUNTRIES: &[&str] = &[
    "US", "US", "US", "US", "US", "US", "US", "US", "KR", "JP", "GB", "FR",
];

const DAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn write_batch(path: &str, schema: Arc<Schema>, batch: RecordBatch) {
    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn generate_all_music(rng: &mut SimpleRng) -> (Arc<Schema>, RecordBatch) {
    let mut tracks: Vec<String> = Vec::new();
    let mut artists: Vec<String> = Vec::new();
    let mut albums: Vec<Option<String>> = Vec::new();
    let mut years: Vec<Option<i64>> = Vec::new();
    let mut ms_played: Vec<i64> = Vec::new();
    let mut countries: Vec<Option<String>> = Vec::new();

    let weighted: Vec<usize> = ARTISTS
        .iter()
        .enumerate()
        .flat_map(|(idx, (_, _, _, weight))| std::iter::repeat(idx).take(*weight as usize))
        .collect();

    for _ in 0..4000 {
        let (artist, artist_tracks, artist_albums, _) = ARTISTS[*rng.pick(&weighted)];
        tracks.push(rng.pick(artist_tracks).to_string());
        artists.push(artist.to_string());
        // Occasional rows with unknown album / year, like a real export.
        albums.push((rng.next_f64() > 0.05).then(|| rng.pick(artist_albums).to_string()));
        years.push((rng.next_f64() > 0.02).then(|| *rng.pick(YEARS)));
        ms_played.push(30_000 + (rng.next_f64() * 240_000.0) as i64);
        countries.push((rng.next_f64() > 0.03).then(|| rng.pick(COUNTRIES).to_string()));
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("track", DataType::Utf8, false),
        Field::new("artist", DataType::Utf8, false),
        Field::new("album", DataType::Utf8, true),
        Field::new("year", DataType::Int64, true),
        Field::new("ms_played", DataType::Int64, false),
        Field::new("country", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                tracks.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                artists.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                albums
                    .iter()
                    .map(|o| o.as_deref())
                    .collect::<Vec<Option<&str>>>(),
            )),
            Arc::new(Int64Array::from(years)),
            Arc::new(Int64Array::from(ms_played)),
            Arc::new(StringArray::from(
                countries
                    .iter()
                    .map(|o| o.as_deref())
                    .collect::<Vec<Option<&str>>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    (schema, batch)
}

fn generate_clustered_sessions(rng: &mut SimpleRng) -> (Arc<Schema>, RecordBatch) {
    // (cluster, typical hour, typical duration in minutes)
    let profiles: [(i64, f64, f64); 4] =
        [(0, 8.0, 25.0), (1, 13.0, 45.0), (2, 19.0, 20.0), (3, 22.0, 90.0)];

    let mut clusters: Vec<i64> = Vec::new();
    let mut avg_hours: Vec<f64> = Vec::new();
    let mut durations: Vec<f64> = Vec::new();
    let mut days: Vec<String> = Vec::new();

    for _ in 0..500 {
        let (cluster, hour, duration) = *rng.pick(&profiles);
        clusters.push(cluster);
        avg_hours.push((hour + (rng.next_f64() - 0.5) * 4.0).rem_euclid(24.0));
        durations.push((duration * (0.5 + rng.next_f64())).max(1.0));
        days.push(rng.pick(DAYS).to_string());
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("cluster", DataType::Int64, false),
        Field::new("avg_hour", DataType::Float64, false),
        Field::new("session_duration_minutes", DataType::Float64, false),
        Field::new("day_of_week", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(clusters)),
            Arc::new(Float64Array::from(avg_hours)),
            Arc::new(Float64Array::from(durations)),
            Arc::new(StringArray::from(
                days.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    (schema, batch)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    std::fs::create_dir_all("data").expect("Failed to create data directory");

    let (schema, batch) = generate_all_music(&mut rng);
    let n_plays = batch.num_rows();
    write_batch("data/all_music.parquet", schema, batch);

    let (schema, batch) = generate_clustered_sessions(&mut rng);
    let n_sessions = batch.num_rows();
    write_batch("data/clustered_sessions.parquet", schema, batch);

    println!("Wrote {n_plays} plays and {n_sessions} clustered sessions to data/");
}
