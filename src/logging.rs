use anyhow::Result;
pub use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Log targets the engine writes to.
pub const TARGETS: [&str; 5] = ["features", "prereq", "body", "character", "enum_key"];

/// Routes the engine's log targets to the terminal and to `<dir>/<name>.log`.
///
/// The engine itself only emits through the `log` facade; hosts call this once at startup.
/// Records from other targets are dropped. Returns the path of the log file.
pub fn init(dir: impl AsRef<Path>, name: &str, level: LevelFilter) -> Result<PathBuf> {
	use simplelog::*;
	std::fs::create_dir_all(dir.as_ref())?;
	let log_path = dir.as_ref().join(format!("{name}.log"));
	let file = std::fs::OpenOptions::new()
		.create(true)
		.write(true)
		.truncate(true)
		.open(&log_path)?;
	let cfg = {
		let mut builder = ConfigBuilder::new();
		builder
			.set_max_level(LevelFilter::Error)
			// [ERROR]
			// [ WARN]
			// [ INFO]
			// [DEBUG]
			// [TRACE]
			.set_level_padding(LevelPadding::Left)
			.set_target_level(LevelFilter::Error)
			.set_location_level(LevelFilter::Off);
		builder.add_filter_allow_str(module_path!());
		for target in TARGETS {
			builder.add_filter_allow_str(target);
		}
		builder.build()
	};
	CombinedLogger::init(vec![
		TermLogger::new(level, cfg.clone(), TerminalMode::Mixed, ColorChoice::Auto),
		WriteLogger::new(level, cfg, file),
	])?;
	log::info!("Writing log to {}", log_path.display());
	Ok(log_path)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn writes_engine_targets_to_file() -> Result<()> {
		let dir = std::env::temp_dir().join(format!("integro-gurps-{}", std::process::id()));
		let path = init(&dir, "engine", LevelFilter::Debug)?;
		assert_eq!(path, dir.join("engine.log"));
		assert!(path.exists());

		log::debug!(target: "body", "updated roll ranges of table 0");
		log::debug!(target: "unrelated", "dropped line");
		log::trace!(target: "body", "below the level");
		let contents = std::fs::read_to_string(&path)?;
		assert!(contents.contains("updated roll ranges of table 0"));
		assert!(!contents.contains("dropped line"));
		assert!(!contents.contains("below the level"));

		std::fs::remove_dir_all(&dir)?;
		Ok(())
	}
}
