use crate::{
    model::{capture::CaptureFrame, record::RecordBundle},
    processor::recorded_data::{ProcessorConfig, RecordedDataProcessor},
};

pub mod cli;
pub mod error;
pub mod model;
pub mod processor;
pub mod writer;

/// Run a sequence of capture frames through a fresh processor and collect
/// the bundles it emits, in order.
pub fn record_frames(frames: &[CaptureFrame], config: ProcessorConfig) -> Vec<RecordBundle> {
    let mut processor = RecordedDataProcessor::with_config(Vec::new(), config);

    for frame in frames {
        processor.process_snapshot(
            &frame.root,
            &frame.system,
            frame.context.clone(),
            frame.timestamp,
        );
    }

    processor.into_writer()
}
