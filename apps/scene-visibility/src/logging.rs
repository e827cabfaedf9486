use crate::config::Config;
use tracing::Subscriber;
use tracing_subscriber::{
	fmt::{format::JsonFields, MakeWriter},
	layer::SubscriberExt,
	registry::LookupSpan,
	util::SubscriberInitExt,
	EnvFilter, Layer, Registry,
};

pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
	let filter = EnvFilter::try_new(&config.rust_log)?;

	tracing_subscriber::registry()
		.with(log_layer::<Registry, _>(config.log_json, std::io::stderr).with_filter(filter))
		.try_init()?;

	Ok(())
}

/// Formatting layer for diagnostics. Results own stdout, so callers hand in stderr.
fn log_layer<S, W>(json: bool, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
	if json {
		Box::new(
			tracing_subscriber::fmt::layer()
				.with_writer(writer)
				.fmt_fields(JsonFields::default())
				.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false)),
		)
	} else {
		Box::new(
			tracing_subscriber::fmt::layer()
				.with_writer(writer)
				.event_format(tracing_subscriber::fmt::format().pretty()),
		)
	}
}
