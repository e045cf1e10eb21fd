use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use popineq_analysis::population::Populations;
use serde::{Serialize, de::DeserializeOwned};

/// Writes `value` as pretty JSON to `output_path`, or to stdout when unset.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    let Some(path) = output_path else {
        return write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout");
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_json(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    eprintln!("Saved result to {}", path.display());
    Ok(())
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} file: {}", path.display()))
}

/// Reads a populations file: a JSON object mapping each group name to its
/// list of values.
///
/// With `num_groups`, only that many of the most populated groups are kept.
pub fn read_populations_file(path: &Path, num_groups: Option<usize>) -> anyhow::Result<Populations> {
    let populations: Populations = read_json_file("populations", path)?;
    eprintln!(
        "Loaded {} groups with {} values",
        populations.len(),
        populations.map.values().map(Vec::len).sum::<usize>()
    );
    let Some(limit) = num_groups else {
        return Ok(populations);
    };
    let selected = populations.select(&populations.largest(Some(limit)));
    eprintln!("Kept the {} most populated groups", selected.len());
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_write_json_is_pretty_with_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &vec![1, 2]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[\n  1,\n  2\n]\n");
    }

    #[test]
    fn test_populations_file_round_trip() {
        let path = env::temp_dir().join(format!("popineq-util-{}.json", process::id()));
        fs::write(&path, r#"{"a": [1, 2, 3], "b": [4], "c": [5, 6]}"#).unwrap();
        let populations = read_populations_file(&path, Some(2)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(populations.largest(None), vec!["a", "c"]);
    }

    #[test]
    fn test_missing_file_names_its_kind() {
        let path = env::temp_dir().join("popineq-util-missing.json");
        let err = read_json_file::<Populations>("populations", &path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open populations file"));
    }
}
