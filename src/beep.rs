//! The buzzer tone, synthesised as an in-memory WAV file so no audio asset has to ship with the binary.

pub const SAMPLE_RATE: u32 = 44_100;
pub const FREQUENCY: u32 = 440;
pub const AMPLITUDE: i16 = 3000;

const WAV_HEADER_LEN: usize = 44;

/// One second of a mono 16-bit square wave at `frequency` Hz.
pub fn square_wave(sample_rate: u32, frequency: u32, amplitude: i16) -> Vec<i16> {
    let half_period = (sample_rate / frequency / 2).max(1);
    (0..sample_rate)
        .map(|i| {
            if (i / half_period) % 2 == 0 {
                amplitude
            } else {
                -amplitude
            }
        })
        .collect()
}

/// Wraps mono 16-bit PCM samples in a RIFF/WAVE container.
pub fn to_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    wav
}

pub fn beep_wav() -> Vec<u8> {
    to_wav(&square_wave(SAMPLE_RATE, FREQUENCY, AMPLITUDE), SAMPLE_RATE)
}
