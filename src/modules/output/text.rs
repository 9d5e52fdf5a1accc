use crate::error::Result;
use crate::modules::{OutputData, OutputModule};

use std::io::Write;

/// Writes one line per frame: `t_ms valid health x y distance`.
pub struct TextOutput<W> {
	writer: W,
	frames: u64,
	valid: u64,
}

impl<W: Write> OutputModule for TextOutput<W> {
	fn run(&mut self, data: OutputData) -> Result<()> {
		let frame = data.frame;
		writeln!(
			self.writer,
			"{} {} {} {:.3} {:.3} {:.3}",
			data.t_ms,
			u8::from(frame.valid),
			frame.health,
			frame.position.x,
			frame.position.y,
			frame.distance,
		)?;

		self.frames += 1;
		if frame.valid {
			self.valid += 1;
		}
		Ok(())
	}
}

impl<W: Write> TextOutput<W> {
	pub fn new(writer: W) -> Self {
		Self {
			writer,
			frames: 0,
			valid: 0,
		}
	}

	pub fn counts(&self) -> (u64, u64) {
		(self.frames, self.valid)
	}

	pub fn flush(&mut self) -> Result<()> {
		self.writer.flush()?;
		Ok(())
	}

	pub fn into_inner(self) -> W {
		self.writer
	}
}
