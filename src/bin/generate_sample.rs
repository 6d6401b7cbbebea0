use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Days, NaiveDate};
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Write a synthetic sales dataset for the dashboard",
    long_about = "Write a deterministic synthetic sales dataset. A .parquet or .pq output \
                  path writes Parquet; anything else writes CSV."
)]
struct Args {
    /// Output file
    #[arg(short, long, default_value = "cleaned_data_sales.csv")]
    output: PathBuf,

    /// Number of sales rows to generate
    #[arg(short, long, default_value_t = 2_000)]
    rows: usize,

    /// PRNG seed; the same seed always writes the same rows
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One output row, in the column layout the dashboard reads.
#[derive(Debug, Serialize)]
struct SampleRow {
    #[serde(rename = "Retailer")]
    retailer: &'static str,
    #[serde(rename = "Region")]
    region: &'static str,
    #[serde(rename = "Sales Method")]
    sales_method: &'static str,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Invoice Date")]
    invoice_date: NaiveDate,
    #[serde(rename = "Product")]
    product: &'static str,
    #[serde(rename = "Units Sold")]
    units_sold: i64,
    #[serde(rename = "Total Sales")]
    total_sales: f64,
    #[serde(rename = "Operating Profit")]
    operating_profit: f64,
}

const RETAILERS: [&str; 5] = ["Foot Locker", "Walmart", "Sports Direct", "West Gear", "Kohl's"];
const REGIONS: [&str; 5] = ["Midwest", "Northeast", "South", "Southeast", "West"];
/// Sales method with its typical operating margin.
const METHODS: [(&str, f64); 3] = [("In-store", 0.36), ("Online", 0.46), ("Outlet", 0.39)];
/// Product with its base unit price.
const PRODUCTS: [(&str, f64); 6] = [
    ("Men's Street Footwear", 45.0),
    ("Men's Athletic Footwear", 43.0),
    ("Women's Street Footwear", 40.0),
    ("Women's Athletic Footwear", 41.0),
    ("Men's Apparel", 48.0),
    ("Women's Apparel", 51.0),
];

fn generate(rows: usize, rng: &mut SimpleRng) -> Result<Vec<SampleRow>> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).context("invalid start date")?;
    let mut out = Vec::with_capacity(rows);

    for _ in 0..rows {
        // Two years of invoices, 2020-01-01 through 2021-12-31.
        let offset = rng.below(731) as u64;
        let invoice_date = start
            .checked_add_days(Days::new(offset))
            .context("invoice date out of range")?;
        let (product, base_price) = *rng.pick(&PRODUCTS);
        let (sales_method, margin) = *rng.pick(&METHODS);

        let units_sold = rng.gauss(250.0, 90.0).round().max(5.0) as i64;
        let price = rng.gauss(base_price, 6.0).max(10.0);
        let total_sales = (units_sold as f64 * price).round();
        let operating_profit = (total_sales * rng.gauss(margin, 0.05).clamp(0.1, 0.8)).round();

        out.push(SampleRow {
            retailer: *rng.pick(&RETAILERS),
            region: *rng.pick(&REGIONS),
            sales_method,
            year: invoice_date.year(),
            invoice_date,
            product,
            units_sold,
            total_sales,
            operating_profit,
        });
    }

    out.sort_by_key(|r| r.invoice_date);
    Ok(out)
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("invalid epoch")?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("Retailer", DataType::Utf8, false),
        Field::new("Region", DataType::Utf8, false),
        Field::new("Sales Method", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Invoice Date", DataType::Date32, false),
        Field::new("Product", DataType::Utf8, false),
        Field::new("Units Sold", DataType::Int64, false),
        Field::new("Total Sales", DataType::Float64, false),
        Field::new("Operating Profit", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.retailer))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.region))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.sales_method))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| i64::from(r.year)))),
            Arc::new(Date32Array::from_iter_values(
                rows.iter().map(|r| (r.invoice_date - epoch).num_days() as i32),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.product))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.units_sold))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.total_sales))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.operating_profit))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let data = generate(args.rows, &mut rng)?;

    let path = args.output.as_path();
    if is_parquet(path) {
        write_parquet(path, &data)?;
    } else {
        write_csv(path, &data)?;
    }

    log::info!("Wrote {} sales rows to {}", data.len(), path.display());
    println!("Wrote {} sales rows to {}", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from("cleaned_data_sales.csv"));
        assert_eq!(args.rows, 2_000);
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn test_args_flags() {
        let args =
            Args::try_parse_from(["generate_sample", "-o", "sales.pq", "--rows", "500"]).unwrap();
        assert_eq!(args.output, PathBuf::from("sales.pq"));
        assert_eq!(args.rows, 500);
        assert!(is_parquet(&args.output));
    }

    #[test]
    fn test_bare_count_is_not_an_output_path() {
        let err = Args::try_parse_from(["generate_sample", "500"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);

        let err = Args::try_parse_from(["generate_sample", "--rows", "many"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(50, &mut SimpleRng::new(7)).unwrap();
        let b = generate(50, &mut SimpleRng::new(7)).unwrap();
        assert_eq!(a.len(), 50);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.invoice_date, y.invoice_date);
            assert_eq!(x.total_sales, y.total_sales);
            assert_eq!(x.year, x.invoice_date.year());
        }
    }
}
