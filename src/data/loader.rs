use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    COL_INVOICE_DATE, COL_METHOD, COL_PRODUCT, COL_PROFIT, COL_REGION, COL_SALES, COL_UNITS,
    COL_YEAR, SaleRecord, SalesDataset,
};
use crate::error::LoadError;

type Result<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file.  Dispatch by extension.
///
/// Supported formats (extensions are case-insensitive):
/// * `.csv`, `.txt`     – header row plus one sale per line (recommended)
/// * `.json`            – `[{ "Region": "West", "Units Sold": 120, ... }, ...]`
/// * `.parquet`, `.pq`  – flat columns named like the CSV header
pub fn load_file(path: &Path) -> Result<SalesDataset> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    log::debug!("loading {} as .{ext}", path.display());

    let records = match ext.as_str() {
        "csv" | "txt" => load_csv(std::fs::File::open(path)?)?,
        "json" => load_json(std::fs::File::open(path)?)?,
        "parquet" | "pq" => load_parquet(std::fs::File::open(path)?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let dataset = SalesDataset::from_records(records);
    if dataset.is_empty() {
        log::warn!("{} has a header but no sales rows", path.display());
    }
    log::info!(
        "Loaded {} sales records from {} ({} regions, {} methods, {} years)",
        dataset.len(),
        path.display(),
        dataset.regions.len(),
        dataset.sales_methods.len(),
        dataset.years.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Field parsing shared by every format
// ---------------------------------------------------------------------------

/// The eight required cells of one row, still as text.
struct RawRow<'a> {
    region: &'a str,
    method: &'a str,
    year: &'a str,
    invoice_date: &'a str,
    product: &'a str,
    units: &'a str,
    sales: &'a str,
    profit: &'a str,
}

impl RawRow<'_> {
    /// Parse every cell; the first bad one fails the row. `row` is 1-based.
    fn parse(&self, row: usize) -> Result<SaleRecord> {
        Ok(SaleRecord {
            region: self.region.trim().to_string(),
            sales_method: self.method.trim().to_string(),
            year: parse_year(self.year).ok_or_else(|| invalid(row, COL_YEAR, self.year))?,
            invoice_date: parse_date(self.invoice_date)
                .ok_or_else(|| invalid(row, COL_INVOICE_DATE, self.invoice_date))?,
            product: self.product.trim().to_string(),
            units_sold: parse_number(self.units)
                .filter(|u| *u >= 0.0)
                .ok_or_else(|| invalid(row, COL_UNITS, self.units))?,
            total_sales: parse_number(self.sales)
                .ok_or_else(|| invalid(row, COL_SALES, self.sales))?,
            operating_profit: parse_number(self.profit)
                .ok_or_else(|| invalid(row, COL_PROFIT, self.profit))?,
        })
    }
}

fn invalid(row: usize, column: &'static str, value: &str) -> LoadError {
    LoadError::InvalidField {
        row,
        column,
        value: value.to_string(),
    }
}

/// Plain or currency-formatted number: `1200`, `1200.5`, `$1,200.50`, `-$35`.
///
/// Commas are only accepted as thousands separators (`1,234,567.5`).
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);
    let cleaned = strip_thousands(s)?;
    if cleaned.starts_with('-') || cleaned.starts_with('+') {
        return None;
    }
    let v = cleaned.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -v } else { v })
}

/// Drop thousands separators from the integer part. The leading group has
/// 1-3 digits and every later group exactly 3.
fn strip_thousands(s: &str) -> Option<String> {
    if !s.contains(',') {
        return Some(s.to_string());
    }
    let (int_part, frac_part) = s.split_at(s.find('.').unwrap_or(s.len()));
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());

    let mut groups = int_part.split(',');
    let lead = groups.next().filter(|g| all_digits(g) && g.len() <= 3)?;
    let mut out = lead.to_string();
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        out.push_str(group);
    }
    out.push_str(frac_part);
    Some(out)
}

/// Integer year; tolerates a float rendering such as `2020.0`.
pub fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Calendar date in any of the layouts the cleaned exports use.
///
/// Timestamps with a `Z` or `+HH:MM` suffix keep the date as written in that
/// offset. Years must have four digits, so `1/5/20` is rejected rather than
/// read as year 20.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .or_else(|| {
                    OFFSET_DATETIME_FORMATS
                        .iter()
                        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
                })
                .map(|dt| dt.date_naive())
        })
        .filter(|d| (1000..=9999).contains(&d.year()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header positions of the required columns.
struct ColumnIndex {
    region: usize,
    method: usize,
    year: usize,
    invoice_date: usize,
    product: usize,
    units: usize,
    sales: usize,
    profit: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            region: find(COL_REGION)?,
            method: find(COL_METHOD)?,
            year: find(COL_YEAR)?,
            invoice_date: find(COL_INVOICE_DATE)?,
            product: find(COL_PRODUCT)?,
            units: find(COL_UNITS)?,
            sales: find(COL_SALES)?,
            profit: find(COL_PROFIT)?,
        })
    }
}

/// CSV layout: header row with column names, any order, extra columns ignored.
pub fn load_csv<R: Read>(input: R) -> Result<Vec<SaleRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let idx = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("");
        let raw = RawRow {
            region: cell(idx.region),
            method: cell(idx.method),
            year: cell(idx.year),
            invoice_date: cell(idx.invoice_date),
            product: cell(idx.product),
            units: cell(idx.units),
            sales: cell(idx.sales),
            profit: cell(idx.profit),
        };
        records.push(raw.parse(row_no + 1)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Region": "West", "Sales Method": "Online", "Year": 2020,
///     "Invoice Date": "2020-01-05", "Product": "Men's Street Footwear",
///     "Units Sold": 120, "Total Sales": 6000.0, "Operating Profit": 3000.0 },
///   ...
/// ]
/// ```
pub fn load_json<R: Read>(input: R) -> Result<Vec<SaleRecord>> {
    let root: JsonValue = serde_json::from_reader(input)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Schema("expected a top-level JSON array".into()))?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Schema(format!("row {row} is not a JSON object")))?;

        let region = json_text(obj, COL_REGION, row)?;
        let method = json_text(obj, COL_METHOD, row)?;
        let year = json_text(obj, COL_YEAR, row)?;
        let invoice_date = json_text(obj, COL_INVOICE_DATE, row)?;
        let product = json_text(obj, COL_PRODUCT, row)?;
        let units = json_text(obj, COL_UNITS, row)?;
        let sales = json_text(obj, COL_SALES, row)?;
        let profit = json_text(obj, COL_PROFIT, row)?;

        let raw = RawRow {
            region: &region,
            method: &method,
            year: &year,
            invoice_date: &invoice_date,
            product: &product,
            units: &units,
            sales: &sales,
            profit: &profit,
        };
        records.push(raw.parse(row)?);
    }
    Ok(records)
}

fn json_text(obj: &Map<String, JsonValue>, column: &'static str, row: usize) -> Result<String> {
    match obj.get(column) {
        None => Err(LoadError::MissingColumn(column)),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(invalid(row, column, &other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Cells may be strings, integers, floats or native dates/timestamps; every
/// cell is rendered to text and then parsed like a CSV cell. Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**.
pub fn load_parquet(file: std::fs::File) -> Result<Vec<SaleRecord>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let region_col = column_by_name(&batch, COL_REGION)?;
        let method_col = column_by_name(&batch, COL_METHOD)?;
        let year_col = column_by_name(&batch, COL_YEAR)?;
        let date_col = column_by_name(&batch, COL_INVOICE_DATE)?;
        let product_col = column_by_name(&batch, COL_PRODUCT)?;
        let units_col = column_by_name(&batch, COL_UNITS)?;
        let sales_col = column_by_name(&batch, COL_SALES)?;
        let profit_col = column_by_name(&batch, COL_PROFIT)?;

        for i in 0..batch.num_rows() {
            let row = records.len() + 1;
            let region = cell_text(region_col, i, COL_REGION, row)?;
            let method = cell_text(method_col, i, COL_METHOD, row)?;
            let year = cell_text(year_col, i, COL_YEAR, row)?;
            let invoice_date = cell_text(date_col, i, COL_INVOICE_DATE, row)?;
            let product = cell_text(product_col, i, COL_PRODUCT, row)?;
            let units = cell_text(units_col, i, COL_UNITS, row)?;
            let sales = cell_text(sales_col, i, COL_SALES, row)?;
            let profit = cell_text(profit_col, i, COL_PROFIT, row)?;

            let raw = RawRow {
                region: &region,
                method: &method,
                year: &year,
                invoice_date: &invoice_date,
                product: &product,
                units: &units,
                sales: &sales,
                profit: &profit,
            };
            records.push(raw.parse(row)?);
        }
    }
    Ok(records)
}

fn column_by_name<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef> {
    batch
        .schema_ref()
        .index_of(name)
        .map(|i| batch.column(i))
        .map_err(|_| LoadError::MissingColumn(name))
}

/// Render one Arrow cell as text. Nulls are rejected.
fn cell_text(col: &ArrayRef, i: usize, column: &'static str, row: usize) -> Result<String> {
    if col.is_null(i) {
        return Err(invalid(row, column, "null"));
    }
    Ok(array_value_to_string(col, i)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{
        Date32Array, Date64Array, Float64Array, Int64Array, StringArray, TimestampNanosecondArray,
    };
    use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const SAMPLE_CSV: &str = "\
Retailer,Region,Sales Method,Year,Invoice Date,Product,Units Sold,Total Sales,Operating Profit
Foot Locker,North,Online,2020,2020-01-05,Shoe,10,100,20
Walmart,South,Outlet,2021,2021-02-10,Shirt,5,50.0,10.5
";

    #[test]
    fn test_csv_with_extra_columns() {
        let recs = load_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].region, "North");
        assert_eq!(recs[0].sales_method, "Online");
        assert_eq!(recs[0].year, 2020);
        assert_eq!(recs[0].invoice_date, NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());
        assert_eq!(recs[0].product, "Shoe");
        assert_eq!(recs[0].units_sold, 10.0);
        assert_eq!(recs[1].total_sales, 50.0);
        assert_eq!(recs[1].operating_profit, 10.5);
    }

    #[test]
    fn test_csv_column_order_is_free() {
        let csv = "\
Operating Profit,Total Sales,Units Sold,Product,Invoice Date,Year,Sales Method,Region
20,100,10,Shoe,01/05/2020,2020,Online,North
";
        let recs = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(recs[0].region, "North");
        assert_eq!(recs[0].total_sales, 100.0);
        assert_eq!(recs[0].invoice_date, NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());
    }

    #[test]
    fn test_csv_missing_column() {
        let csv = "Region,Sales Method,Year,Invoice Date,Product,Units Sold,Total Sales\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Operating Profit")));
    }

    #[test]
    fn test_csv_bad_date_fails_whole_load() {
        let csv = "\
Region,Sales Method,Year,Invoice Date,Product,Units Sold,Total Sales,Operating Profit
North,Online,2020,2020-01-05,Shoe,10,100,20
North,Online,2020,not a date,Shoe,10,100,20
";
        match load_csv(csv.as_bytes()) {
            Err(LoadError::InvalidField { row, column, value }) => {
                assert_eq!(row, 2);
                assert_eq!(column, COL_INVOICE_DATE);
                assert_eq!(value, "not a date");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_csv_bad_number() {
        let csv = "\
Region,Sales Method,Year,Invoice Date,Product,Units Sold,Total Sales,Operating Profit
North,Online,2020,2020-01-05,Shoe,ten,100,20
";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: COL_UNITS, .. }));
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("1200"), Some(1200.0));
        assert_eq!(parse_number(" 1200.5 "), Some(1200.5));
        assert_eq!(parse_number("$1,200.50"), Some(1200.5));
        assert_eq!(parse_number("-$35"), Some(-35.0));
        assert_eq!(parse_number("--3"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_parse_number_thousands_groups() {
        assert_eq!(parse_number("1,234,567.5"), Some(1_234_567.5));
        assert_eq!(parse_number("-$12,000"), Some(-12_000.0));
        assert_eq!(parse_number("1,2,3"), None);
        assert_eq!(parse_number("12,34"), None);
        assert_eq!(parse_number("1234,567"), None);
        assert_eq!(parse_number(",123"), None);
        assert_eq!(parse_number("1,234."), Some(1234.0));
        assert_eq!(parse_number("1,234.5,6"), None);
    }

    #[test]
    fn test_parse_year_and_date() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year("2021.0"), Some(2021));
        assert_eq!(parse_year("2021.5"), None);

        let d = NaiveDate::from_ymd_opt(2021, 2, 10).unwrap();
        assert_eq!(parse_date("2021-02-10"), Some(d));
        assert_eq!(parse_date("02/10/2021"), Some(d));
        assert_eq!(parse_date("2021-02-10 00:00:00"), Some(d));
        assert_eq!(parse_date("2021-02-10T13:45:00"), Some(d));
        assert_eq!(parse_date("2021-13-10"), None);
    }

    #[test]
    fn test_parse_date_requires_four_digit_year() {
        assert_eq!(parse_date("1/5/20"), None);
        assert_eq!(parse_date("01/05/20"), None);
        assert_eq!(parse_date("20-01-05"), None);
        assert_eq!(parse_date("20-01-05 00:00:00"), None);
        assert_eq!(parse_date("1/5/2020"), NaiveDate::from_ymd_opt(2020, 1, 5));
    }

    #[test]
    fn test_parse_date_with_offset() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 5);
        assert_eq!(parse_date("2020-01-05T00:00:00Z"), d);
        assert_eq!(parse_date("2020-01-05T00:00:00+00:00"), d);
        assert_eq!(parse_date("2020-01-05T23:30:00.250-05:00"), d);
        assert_eq!(parse_date("2020-01-05 08:00:00+09:00"), d);
    }

    #[test]
    fn test_csv_short_year_fails_load() {
        let csv = "\
Region,Sales Method,Year,Invoice Date,Product,Units Sold,Total Sales,Operating Profit
North,Online,2020,1/5/20,Shoe,10,100,20
";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField { row: 1, column: COL_INVOICE_DATE, ref value } if value == "1/5/20"
        ));
    }

    #[test]
    fn test_negative_units_rejected() {
        let csv = "\
Region,Sales Method,Year,Invoice Date,Product,Units Sold,Total Sales,Operating Profit
North,Online,2020,2020-01-05,Shoe,-1,100,20
";
        assert!(load_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_json_records() {
        let json = r#"[
            {"Region": "North", "Sales Method": "Online", "Year": 2020,
             "Invoice Date": "2020-01-05", "Product": "Shoe",
             "Units Sold": 10, "Total Sales": 100.0, "Operating Profit": 20.0},
            {"Region": "South", "Sales Method": "Outlet", "Year": "2021",
             "Invoice Date": "2021-02-10", "Product": "Shirt",
             "Units Sold": 5, "Total Sales": "$50", "Operating Profit": 10}
        ]"#;
        let recs = load_json(json.as_bytes()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].year, 2020);
        assert_eq!(recs[1].year, 2021);
        assert_eq!(recs[1].total_sales, 50.0);
    }

    #[test]
    fn test_json_null_is_invalid() {
        let json = r#"[{"Region": null, "Sales Method": "Online", "Year": 2020,
            "Invoice Date": "2020-01-05", "Product": "Shoe",
            "Units Sold": 10, "Total Sales": 100, "Operating Profit": 20}]"#;
        let err = load_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { row: 1, column: COL_REGION, .. }));
    }

    #[test]
    fn test_json_not_an_array() {
        let err = load_json(r#"{"Region": "North"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_load_file_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn test_load_file_csv_builds_options() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        file.flush().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.regions.iter().collect::<Vec<_>>(), vec!["North", "South"]);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2020, 2021]);
    }

    #[test]
    fn test_load_file_txt_is_csv() {
        let mut file = tempfile::Builder::new().suffix(".TXT").tempfile().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        file.flush().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].product, "Shirt");
    }

    fn days(y: i32, m: u32, d: u32) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        (NaiveDate::from_ymd_opt(y, m, d).unwrap() - epoch).num_days() as i32
    }

    fn nanos(y: i32, m: u32, d: u32, hour: u32, min: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
            .and_utc()
            .timestamp_nanos_opt()
            .unwrap()
    }

    /// Two-row sales file whose Invoice Date column has the given Arrow type.
    fn write_parquet(
        suffix: &str,
        date_type: DataType,
        dates: ArrayRef,
    ) -> tempfile::NamedTempFile {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_REGION, DataType::Utf8, false),
            Field::new(COL_METHOD, DataType::Utf8, false),
            Field::new(COL_YEAR, DataType::Int64, false),
            Field::new(COL_INVOICE_DATE, date_type, false),
            Field::new(COL_PRODUCT, DataType::Utf8, false),
            Field::new(COL_UNITS, DataType::Int64, false),
            Field::new(COL_SALES, DataType::Float64, false),
            Field::new(COL_PROFIT, DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["North", "South"])),
                Arc::new(StringArray::from(vec!["Online", "Outlet"])),
                Arc::new(Int64Array::from(vec![2020, 2021])),
                dates,
                Arc::new(StringArray::from(vec!["Shoe", "Shirt"])),
                Arc::new(Int64Array::from(vec![10, 5])),
                Arc::new(Float64Array::from(vec![100.0, 50.0])),
                Arc::new(Float64Array::from(vec![20.0, 10.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn assert_sample_dates(ds: &SalesDataset) {
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].invoice_date, NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());
        assert_eq!(ds.records[1].invoice_date, NaiveDate::from_ymd_opt(2021, 2, 10).unwrap());
    }

    #[test]
    fn test_load_file_parquet() {
        let dates = Arc::new(Date32Array::from(vec![days(2020, 1, 5), days(2021, 2, 10)]));
        let file = write_parquet(".parquet", DataType::Date32, dates);

        let ds = load_file(file.path()).unwrap();
        assert_sample_dates(&ds);
        assert_eq!(ds.records[1].year, 2021);
        assert_eq!(ds.records[0].units_sold, 10.0);
        assert_eq!(ds.records[0].total_sales, 100.0);
    }

    #[test]
    fn test_load_file_parquet_naive_timestamps() {
        let dates = Arc::new(TimestampNanosecondArray::from(vec![
            nanos(2020, 1, 5, 0, 0),
            nanos(2021, 2, 10, 13, 45),
        ]));
        let file = write_parquet(
            ".parquet",
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            dates,
        );
        assert_sample_dates(&load_file(file.path()).unwrap());
    }

    #[test]
    fn test_load_file_pq_utc_timestamps() {
        let dates = Arc::new(
            TimestampNanosecondArray::from(vec![
                nanos(2020, 1, 5, 0, 0),
                nanos(2021, 2, 10, 23, 30),
            ])
            .with_timezone("UTC"),
        );
        let file = write_parquet(
            ".pq",
            DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
            dates,
        );
        assert_sample_dates(&load_file(file.path()).unwrap());
    }

    #[test]
    fn test_load_file_parquet_date64() {
        let millis = |y, m, d| i64::from(days(y, m, d)) * 86_400_000;
        let dates = Arc::new(Date64Array::from(vec![millis(2020, 1, 5), millis(2021, 2, 10)]));
        let file = write_parquet(".parquet", DataType::Date64, dates);
        assert_sample_dates(&load_file(file.path()).unwrap());
    }
}
