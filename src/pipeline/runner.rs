use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use crate::catalog::{load_catalog, CatalogRecord};
use crate::config::Config;
use crate::pipeline::error::{RecordError, RunError};
use crate::propagator::Propagator;
use crate::trace::{sample_period, Sample, TraceError, TraceFile, TraceHeader};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub records: usize,
    pub samples_per_record: usize,
    pub bytes: u64,
}

/// Normalize one record and sample it across one period.
pub fn process_record<P: Propagator + ?Sized>(
    record: &CatalogRecord,
    config: &Config,
    propagator: &P,
) -> Result<Vec<Sample>, RecordError> {
    let elements = config.element_source.mean_elements(record)?;
    let samples = sample_period(
        &elements,
        record.period_minutes,
        config.samples_per_period,
        propagator,
    )?;
    Ok(samples)
}

/// Turn a catalog into a trace file.
///
/// All or nothing: the destination only appears once every record has been
/// sampled and written. A catalog that fails to decode never creates output.
pub fn generate<P: Propagator + ?Sized>(
    catalog_path: &Path,
    output_path: &Path,
    config: &Config,
    propagator: &P,
) -> Result<RunSummary, RunError> {
    config.validate()?;

    let records = load_catalog(catalog_path, config.period_tolerance)?;
    log::info!(
        "Loaded {} records from {}",
        records.len(),
        catalog_path.display()
    );

    let record_count = u32::try_from(records.len()).map_err(|_| TraceError::OutOfRange {
        what: "record count",
        value: records.len() as u64,
    })?;
    let header = TraceHeader {
        record_count,
        samples_per_period: config.samples_per_period,
    };
    let mut trace = TraceFile::create(output_path, header)?;
    log::debug!("Writing trace to {}", trace.partial_path().display());

    let mut emit = |record: &CatalogRecord, samples: Vec<Sample>| -> Result<(), RunError> {
        trace.write_record(record.catalog_id, &samples)?;
        log::debug!(
            "Record {} ({}): {} samples",
            record.catalog_id,
            record.name,
            samples.len()
        );
        Ok(())
    };

    if config.jobs > 1 && records.len() > 1 {
        run_parallel(&records, config, propagator, &mut emit)?;
    } else {
        for record in &records {
            let samples = process_record(record, config, propagator).map_err(|source| {
                RunError::Record {
                    catalog_id: record.catalog_id,
                    source,
                }
            })?;
            emit(record, samples)?;
        }
    }

    let bytes = trace.commit()?;
    log::info!(
        "Wrote {} records x {} samples to {} ({} bytes)",
        records.len(),
        header.samples_per_record(),
        output_path.display(),
        bytes
    );

    Ok(RunSummary {
        output: output_path.to_path_buf(),
        records: records.len(),
        samples_per_record: header.samples_per_record(),
        bytes,
    })
}

/// Sample records on `config.jobs` worker threads. Results are buffered and
/// handed to `emit` strictly in catalog order. The first failure, in any
/// record, stops the workers from picking up new records.
fn run_parallel<P, F>(
    records: &[CatalogRecord],
    config: &Config,
    propagator: &P,
    emit: &mut F,
) -> Result<(), RunError>
where
    P: Propagator + ?Sized,
    F: FnMut(&CatalogRecord, Vec<Sample>) -> Result<(), RunError>,
{
    let cancelled = AtomicBool::new(false);
    let next = AtomicUsize::new(0);
    let workers = config.jobs.min(records.len());
    log::debug!("Sampling {} records on {} threads", records.len(), workers);

    thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();
        for _ in 0..workers {
            let tx = tx.clone();
            let (cancelled, next) = (&cancelled, &next);
            scope.spawn(move || {
                while !cancelled.load(Ordering::Relaxed) {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(record) = records.get(index) else {
                        break;
                    };
                    let result = process_record(record, config, propagator);
                    if result.is_err() {
                        cancelled.store(true, Ordering::Relaxed);
                    }
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let mut pending = BTreeMap::new();
        let mut next_to_emit = 0;
        for (index, result) in rx {
            // Lower indices are already claimed and still get delivered, so
            // the reported error matches a sequential run.
            if result.is_err() {
                cancelled.store(true, Ordering::Relaxed);
            }
            pending.insert(index, result);
            while let Some(result) = pending.remove(&next_to_emit) {
                let record = &records[next_to_emit];
                let outcome = result
                    .map_err(|source| RunError::Record {
                        catalog_id: record.catalog_id,
                        source,
                    })
                    .and_then(|samples| emit(record, samples));
                if let Err(e) = outcome {
                    cancelled.store(true, Ordering::Relaxed);
                    return Err(e);
                }
                next_to_emit += 1;
            }
        }
        Ok(())
    })
}
