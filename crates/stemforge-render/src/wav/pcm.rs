//! PCM payload extraction and content hashing.

/// Extracts the PCM payload from an encoded WAV file.
///
/// Walks the RIFF chunk list looking for the `data` chunk, so files with
/// extra chunks from other encoders still decode. Returns `None` when the
/// bytes are not a WAV file.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 44 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        if chunk_id == b"data" {
            let start = pos + 8;
            let end = start.checked_add(chunk_size)?;
            return (end <= wav_data.len()).then(|| &wav_data[start..end]);
        }

        pos += 8 + chunk_size;
        // Chunks are word-aligned
        if chunk_size % 2 == 1 {
            pos += 1;
        }
    }

    None
}

/// BLAKE3 hash of a WAV file's PCM payload, as lowercase hex.
///
/// Hashing only the payload lets determinism checks ignore header
/// differences between encoders.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
