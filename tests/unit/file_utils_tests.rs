/*!
 * Tests for file and folder operations
 */

use anyhow::Result;
use subcomply::file_utils::FileManager;

use crate::common;

/// Test that written files can be read back
#[test]
fn test_writeToFile_thenReadSubtitle_shouldRoundTripContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out/sub.srt");

    FileManager::write_to_file(&path, common::SAMPLE_SRT)?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_subtitle(&path)?, common::SAMPLE_SRT);
    Ok(())
}

#[test]
fn test_findFiles_withNestedFolders_shouldFindAllSubtitles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    common::create_test_subtitle(temp_dir.path(), "season1/b.srt")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a subtitle")?;

    let files = FileManager::find_files(temp_dir.path(), ".srt")?;

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "srt")));
    Ok(())
}

#[test]
fn test_splitIntoFrames_thenChunk_shouldReproduceTrack() {
    let frames = FileManager::split_into_frames(common::SAMPLE_SRT);

    let chunks = FileManager::chunk_frames(&frames, 80);

    assert_eq!(frames.len(), 3);
    assert!(chunks.len() >= 2);
    assert_eq!(chunks.concat(), common::SAMPLE_SRT);
}

#[test]
fn test_chunkFrames_withLargeLimit_shouldGiveOneChunk() {
    let frames = FileManager::split_into_frames(common::SAMPLE_SRT);

    let chunks = FileManager::chunk_frames(&frames, 4300);

    assert_eq!(chunks, vec![common::SAMPLE_SRT.to_string()]);
}

#[test]
fn test_chunkFrames_shouldCountCharactersNotBytes() {
    let frames = vec!["가나다".to_string(), "라마바".to_string()];

    let chunks = FileManager::chunk_frames(&frames, 6);

    assert_eq!(chunks, vec!["가나다라마바"]);
}

#[test]
fn test_generateOutputPath_withTimestamp_shouldAppendDateSuffix() {
    let path = FileManager::generate_output_path("movie.srt", "output", "", "compliant", true);
    let name = path.file_name().unwrap().to_string_lossy().to_string();

    // movie-compliant-YYYY-MM-DD--HH-MM.srt
    assert!(name.starts_with("movie-compliant-"));
    assert!(name.ends_with(".srt"));
    assert_eq!(name.len(), "movie-compliant-".len() + "2024-01-01--00-00".len() + ".srt".len());
    assert!(path.starts_with("output"));
}
