use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use presence_core::{rms, AmplitudeTap, AudioCapture, PresenceError};

// Speech RMS off a raw microphone sits well below 1.0
const MIC_GAIN: f32 = 4.0;

/// Default input device; each callback buffer is reduced to one RMS value
/// and pushed into the engine's tap.
#[derive(Default)]
pub struct CpalCapture {
    stream: Option<cpal::Stream>,
}

impl CpalCapture {
    pub fn new() -> Self {
        Self::default()
    }
}

fn scaled(level: f32) -> f32 {
    (level * MIC_GAIN).min(1.0)
}

fn rms_i16(data: &[i16]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data
        .iter()
        .map(|&s| {
            let v = s as f64 / i16::MAX as f64;
            v * v
        })
        .sum();
    (sum / data.len() as f64).sqrt() as f32
}

fn rms_u16(data: &[u16]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data
        .iter()
        .map(|&s| {
            let v = (s as f64 - 32768.0) / 32768.0;
            v * v
        })
        .sum();
    (sum / data.len() as f64).sqrt() as f32
}

impl AudioCapture for CpalCapture {
    fn start(&mut self, tap: AmplitudeTap) -> Result<(), PresenceError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| PresenceError::AudioSetup("no audio input device available".into()))?;
        let supported = device
            .default_input_config()
            .map_err(|e| PresenceError::AudioSetup(e.to_string()))?;
        let format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();
        let err_fn = |err: cpal::StreamError| log::error!("[audio] capture error: {err}");

        let stream = match format {
            cpal::SampleFormat::F32 => device.build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| tap.push(scaled(rms(data))),
                err_fn,
                None,
            ),
            cpal::SampleFormat::I16 => device.build_input_stream(
                &stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| tap.push(scaled(rms_i16(data))),
                err_fn,
                None,
            ),
            cpal::SampleFormat::U16 => device.build_input_stream(
                &stream_config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| tap.push(scaled(rms_u16(data))),
                err_fn,
                None,
            ),
            other => {
                return Err(PresenceError::AudioSetup(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        }
        .map_err(|e| PresenceError::AudioSetup(format!("failed to build input stream: {e}")))?;

        stream
            .play()
            .map_err(|e| PresenceError::AudioSetup(format!("failed to start audio stream: {e}")))?;
        log::info!(
            "[audio] capturing {} ch @ {} Hz ({:?})",
            stream_config.channels,
            stream_config.sample_rate.0,
            format
        );
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) {
        if self.stream.take().is_some() {
            log::info!("[audio] capture stopped");
        }
    }
}
