/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use subcomply::app_config::Config;
use subcomply::app_controller::{Controller, FolderSummary};
use subcomply::file_utils::FileManager;

use crate::common;

fn config_without_timestamp() -> Config {
    let mut config = Config::default();
    config.output.timestamp_suffix = false;
    config
}

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;

    assert_eq!(controller.config(), &Config::default());
    Ok(())
}

#[test]
fn test_run_withSubtitleFile_shouldWriteCompliantOutput() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;
    let output_dir = temp_dir.path().join("output");
    let controller = Controller::with_config(config_without_timestamp())?;

    let written = controller.run(input, output_dir.clone(), false)?;

    let written = written.expect("output should be written");
    assert_eq!(written, output_dir.join("episode-compliant.srt"));
    let content = FileManager::read_subtitle(&written)?;
    assert!(content.starts_with("1\n00:00:01,000 --> "));
    assert!(controller.audit(&written)?.passed);
    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;
    let output_dir = temp_dir.path().join("output");
    let controller = Controller::with_config(config_without_timestamp())?;

    controller.run(input.clone(), output_dir.clone(), false)?;
    let skipped = controller.run(input.clone(), output_dir.clone(), false)?;
    let forced = controller.run(input, output_dir, true)?;

    assert!(skipped.is_none());
    assert!(forced.is_some());
    Ok(())
}

#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let result = controller.run(temp_dir.path().join("nope.srt"), temp_dir.path().to_path_buf(), false);

    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_runFolder_shouldProcessEverySourceOnce() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    common::create_test_subtitle(temp_dir.path(), "season1/b.srt")?;
    common::create_test_subtitle(temp_dir.path(), "old-compliant.srt")?;
    let controller = Controller::with_config(config_without_timestamp())?;

    let first = controller.run_folder(temp_dir.path().to_path_buf(), None, false)?;
    let second = controller.run_folder(temp_dir.path().to_path_buf(), None, false)?;

    assert_eq!(first, FolderSummary { processed: 2, skipped: 0, errors: 0 });
    assert_eq!(second, FolderSummary { processed: 0, skipped: 2, errors: 0 });
    let outputs = FileManager::find_files(temp_dir.path().join("output"), "srt")?;
    assert_eq!(outputs.len(), 2);
    Ok(())
}

#[test]
fn test_runFolder_withOutputDir_shouldWriteThere() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_dir = temp_dir.path().join("sources");
    let target_dir = temp_dir.path().join("delivery");
    common::create_test_subtitle(&input_dir, "a.srt")?;
    common::create_test_subtitle(&input_dir, "nested/b.srt")?;
    let controller = Controller::with_config(config_without_timestamp())?;

    let summary = controller.run_folder(input_dir.clone(), Some(target_dir.clone()), false)?;

    assert_eq!(summary, FolderSummary { processed: 2, skipped: 0, errors: 0 });
    assert!(target_dir.join("a-compliant.srt").exists());
    assert!(target_dir.join("b-compliant.srt").exists());
    assert!(!input_dir.join("output").exists());
    Ok(())
}

#[test]
fn test_runFolder_withOutputDirInsideInput_shouldNotReprocessResults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    let target_dir = temp_dir.path().join("delivered");
    let mut config = config_without_timestamp();
    config.output.postfix = String::new();
    let controller = Controller::with_config(config)?;

    controller.run_folder(temp_dir.path().to_path_buf(), Some(target_dir.clone()), false)?;
    let second = controller.run_folder(temp_dir.path().to_path_buf(), Some(target_dir), true)?;

    assert_eq!(second, FolderSummary { processed: 1, skipped: 0, errors: 0 });
    Ok(())
}

#[test]
fn test_runFolder_withNoSubtitles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.txt", "nothing here")?;
    let controller = Controller::new_for_test()?;

    assert!(controller.run_folder(temp_dir.path().to_path_buf(), None, false).is_err());
    Ok(())
}

#[test]
fn test_audit_withNonCompliantFile_shouldReportIssues() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "bad.srt",
        "1\n00:00:01,000 --> 00:00:01,100\nThis line is far too long to be read in a tenth of a second by anyone",
    )?;
    let controller = Controller::new_for_test()?;

    let report = controller.audit(&input)?;

    assert!(!report.passed);
    assert!(report.total_issues >= 3);
    Ok(())
}

#[test]
fn test_chunk_shouldWriteNumberedPartsThatRebuildTheTrack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let mut config = Config::default();
    config.chunking.max_chars_per_chunk = 130;
    let controller = Controller::with_config(config)?;

    let parts = controller.chunk(&input, &temp_dir.path().join("parts"))?;

    assert_eq!(parts.len(), 2);
    assert!(parts[0].ends_with("parts/movie.part-001.srt"));
    assert!(parts[1].ends_with("parts/movie.part-002.srt"));
    let rebuilt: String = parts
        .iter()
        .map(FileManager::read_subtitle)
        .collect::<Result<Vec<_>>>()?
        .concat();
    assert_eq!(rebuilt, common::SAMPLE_SRT);
    Ok(())
}
