use std::io::Write;
use tempfile::NamedTempFile;

/// Catalog shared by the CLI tests: one venue, one package, two vendors
/// (the second has no listed price).
pub fn standard_catalog() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "kind, id, name, capacity, price, price_per_guest").unwrap();
    writeln!(file, "venue, 1, Grand Hall, 500, 100000, ").unwrap();
    writeln!(file, "package, 1, Standard, , 60000, 500").unwrap();
    writeln!(file, "vendor, 1, Shutterbug, , 15000, ").unwrap();
    writeln!(file, "vendor, 2, Mystery Band, , , ").unwrap();
    file
}

pub fn instructions(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, client, event, item, qty, amount, date, arg").unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}
