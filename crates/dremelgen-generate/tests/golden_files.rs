use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use dremelgen_generate::{
    ColumnTable, GenerateOptions, GenerationEngine, GenerationReport, Profile, RunOutcome,
};

fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Generate 64 records of about 500 bytes into a fresh directory.
fn run_golden(seed: u64, likelihood: f64) -> (GenerationReport, PathBuf) {
    let out_dir = std::env::temp_dir().join(format!("dremelgen_golden_{}", uuid::Uuid::new_v4()));

    let mut options = GenerateOptions::new(
        64,
        Profile::Sized {
            avg_record_bytes: 500,
        },
    );
    options.out_dir = out_dir.clone();
    options.seed = seed;
    options.likelihood = likelihood;

    let engine = GenerationEngine::new(options).expect("build engine");
    match engine.run().expect("run generation") {
        RunOutcome::Generated(report) => (report, out_dir),
        RunOutcome::Skipped { .. } => panic!("fresh directory should not skip"),
    }
}

fn assert_table(
    out_dir: &Path,
    report: &GenerationReport,
    table: ColumnTable,
    rows: u64,
    hash: &str,
) {
    let path = out_dir.join(table.file_name());
    let actual = hash_file(&path).expect("hash table");
    assert_eq!(actual, hash, "{} hash mismatch", table.file_name());
    let table_report = report.table(table).expect("table report");
    assert_eq!(table_report.rows_written, rows, "{} rows", table.file_name());
}

#[test]
fn golden_files_are_stable() {
    let (report, out_dir) = run_golden(1234, 1.0);

    let json_path = out_dir.join("generated_data_64_500.json");
    assert_eq!(report.json_path.as_deref(), Some(json_path.as_path()));
    assert_eq!(
        hash_file(&json_path).expect("hash json"),
        "71839cde3ba4a69bde73458406d771dad2735e4f17792346c68b2078db492237",
        "json hash mismatch"
    );
    assert_eq!(report.total_bytes, 28100);
    assert_eq!(report.avg_bytes_per_record, 439.0625);

    let expected = [
        (
            ColumnTable::DocId,
            64,
            "260d1005a1a0dee525ccd4cf86a3027f69d3c207b4c8d4806475054a2c3b6d15",
        ),
        (
            ColumnTable::LinksBackward,
            882,
            "f799c94ee461d28870d7d6a577a264fc1b993f53d1872266f3cc6cb79c1ac6e1",
        ),
        (
            ColumnTable::LinksForward,
            830,
            "862fb479af1bb95dac5e7efbee10939155ae578f2b39acd26a6212128990f59d",
        ),
        (
            ColumnTable::NameLanguageCode,
            896,
            "c918d53e7ef9c07c65eadd4c84bbc1420e3defec4140fc60e2b20ec1a979f4cc",
        ),
        (
            ColumnTable::NameLanguageCountry,
            896,
            "04530e7e9baba0af04c293dc350baa1ad5c9e05328f5404b636999e6858a5014",
        ),
        (
            ColumnTable::NameUrl,
            381,
            "5193522569dbafcf6e2c60180a3b5eed2b1f6c8a93287a40c92d02a98ba4bc7f",
        ),
    ];
    for (table, rows, hash) in expected {
        assert_table(&out_dir, &report, table, rows, hash);
    }
}

#[test]
fn golden_files_are_stable_at_half_likelihood() {
    let (report, out_dir) = run_golden(42, 0.5);

    assert_eq!(
        hash_file(&out_dir.join("generated_data_64_500.json")).expect("hash json"),
        "11a7a13ca14d37e3d6e5af59517c011bf0e3059f5e1a98502de35641f2a47755",
        "json hash mismatch"
    );
    assert_eq!(report.total_bytes, 13785);

    let expected = [
        (
            ColumnTable::DocId,
            64,
            "260d1005a1a0dee525ccd4cf86a3027f69d3c207b4c8d4806475054a2c3b6d15",
        ),
        (
            ColumnTable::LinksBackward,
            303,
            "d28c4fda926c148abe10d944062f2e3617d6f5d594a5c83839cc181c6582daed",
        ),
        (
            ColumnTable::LinksForward,
            242,
            "78dac21d11c1e681a54946d689d1b7c4e49283361cab012781100f9f462e7256",
        ),
        (
            ColumnTable::NameLanguageCode,
            895,
            "a29ecac72aa1be1673f85021454746d84da14e60d8b5cc8ac4a08e1e342084e8",
        ),
        (
            ColumnTable::NameLanguageCountry,
            449,
            "b867d1b4c644ac6d5c6a0a3a53da28758cc652dee5dc62a830578afabddbfbb3",
        ),
        (
            ColumnTable::NameUrl,
            177,
            "ccf90615866f6b1b26cd686e86a3aeb5e487d48c5f00934893e3b9c7bc0141c4",
        ),
    ];
    for (table, rows, hash) in expected {
        assert_table(&out_dir, &report, table, rows, hash);
    }
}
