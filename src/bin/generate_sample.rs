use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let ship_modes = ["Standard Class", "Second Class", "First Class", "Same Day"];
    let segments = ["Consumer", "Corporate", "Home Office"];
    let regions = ["West", "East", "Central", "South"];

    let n_customers = 120usize;
    let n_orders = 2000usize;

    let customer_pool: Vec<String> = (0..n_customers)
        .map(|i| format!("CU-{:05}", 10000 + i))
        .collect();

    let mut customer_ids: Vec<String> = Vec::with_capacity(n_orders);
    let mut values: Vec<f64> = Vec::with_capacity(n_orders);
    let mut order_ship_modes: Vec<&str> = Vec::with_capacity(n_orders);
    let mut order_segments: Vec<&str> = Vec::with_capacity(n_orders);
    let mut order_regions: Vec<&str> = Vec::with_capacity(n_orders);

    for _ in 0..n_orders {
        let customer = &customer_pool[(rng.next_u64() % n_customers as u64) as usize];

        // Log-normal order values: most orders small, a long tail of big ones.
        let value = (rng.gauss(4.0, 1.1).exp() * 100.0).round() / 100.0;
        let value = value.max(1.0);

        customer_ids.push(customer.clone());
        values.push(value);
        order_ship_modes.push(rng.pick(&ship_modes));
        order_segments.push(rng.pick(&segments));
        // "Region" is deliberately not a recognized dashboard column
        order_regions.push(rng.pick(&regions));
    }

    // ---- CSV ----
    let csv_path = "sample_orders.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record(["Customer_ID", "Value", "Ship_Mode", "Segment", "Region"])
        .expect("Failed to write CSV header");
    for i in 0..n_orders {
        let value = format!("{:.2}", values[i]);
        writer
            .write_record([
                customer_ids[i].as_str(),
                value.as_str(),
                order_ship_modes[i],
                order_segments[i],
                order_regions[i],
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Customer_ID", DataType::Utf8, false),
        Field::new("Value", DataType::Float64, false),
        Field::new("Ship_Mode", DataType::Utf8, false),
        Field::new("Segment", DataType::Utf8, false),
        Field::new("Region", DataType::Utf8, false),
    ]));

    let customer_array = StringArray::from(
        customer_ids.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    );
    let value_array = Float64Array::from(values);
    let ship_array = StringArray::from(order_ship_modes);
    let segment_array = StringArray::from(order_segments);
    let region_array = StringArray::from(order_regions);

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(customer_array),
            Arc::new(value_array),
            Arc::new(ship_array),
            Arc::new(segment_array),
            Arc::new(region_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "sample_orders.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_orders} orders ({n_customers} customers) to {csv_path} and {parquet_path}");
}
