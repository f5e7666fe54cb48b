mod adapters;
mod cli;
mod core;
mod global_constants;
mod result_emitter;

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

use clap::error::ErrorKind;
use clap::Parser;

use crate::adapters::{HubOcrsModelLoader, LocalOcrsModelLoader, SystemAcceleratorProbe};
use crate::cli::CliArgs;
use crate::core::models::{AdapterError, AdapterSettings};
use crate::core::orchestrators::{OcrPipeline, ResourceAcquisition};
use crate::global_constants::{DEFAULT_MAX_CHARS, LOG_TAG_MAIN};

fn main() {
    let settings = AdapterSettings::from_env();
    init_logging(settings.debug);

    log::debug!(
        "{} Starting {} with model dir {:?}",
        LOG_TAG_MAIN,
        global_constants::APPLICATION_NAME,
        settings.model_dir
    );

    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = error.print();
            return;
        }
        Err(error) => {
            report_fatal(&AdapterError::InvalidArguments(format!("{:?}", error.kind())));
            log::debug!("{} {}", LOG_TAG_MAIN, error);
            emit(String::new(), DEFAULT_MAX_CHARS);
            return;
        }
    };

    let request = match args.into_request() {
        Ok(request) => request,
        Err(error) => {
            report_fatal(&error);
            emit(String::new(), DEFAULT_MAX_CHARS);
            return;
        }
    };

    let primary_loader = LocalOcrsModelLoader::new(&settings.model_dir);
    let alternate_loader = HubOcrsModelLoader::new(&settings.model_dir);
    let accelerator_probe = SystemAcceleratorProbe;
    let pipeline = OcrPipeline::new(
        ResourceAcquisition::new(&primary_loader, &alternate_loader, &accelerator_probe),
        &settings.model_identifier,
    );

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| pipeline.run(&request)))
        .unwrap_or_else(|payload| Err(AdapterError::Panicked(panic_message(payload.as_ref()))));

    let text = outcome.unwrap_or_else(|error| {
        report_fatal(&error);
        String::new()
    });

    emit(text, request.max_chars());
}

fn init_logging(debug: bool) {
    let crate_level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Warn)
        .filter_module(module_path!(), crate_level)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init();
}

fn report_fatal(error: &AdapterError) {
    log::warn!("{} {}", LOG_TAG_MAIN, error);
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn emit(text: String, max_chars: usize) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    result_emitter::emit_normalized_text(&mut handle, &text, max_chars);
}
