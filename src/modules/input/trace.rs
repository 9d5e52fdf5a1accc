use crate::error::{Error, Result};
use crate::modules::input::{RawDot, Slots, Vec3, SLOT_MAX};
use crate::modules::{InputModule, Sample};

use std::io::BufRead;
use std::str::FromStr;

/// Reads recorded sensor reports, one per line:
///
/// `t_ms x0 y0 x1 y1 x2 y2 x3 y3 ax ay az`
///
/// `1023 1023` marks an inactive slot. Blank lines and lines starting with
/// `#` are skipped.
pub struct TraceInput<R> {
	reader: R,
	line: usize,
	buf: String,
}

impl<R: BufRead> TraceInput<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			line: 0,
			buf: String::new(),
		}
	}

	fn error(&self, reason: impl Into<String>) -> Error {
		Error::Trace {
			line: self.line,
			reason: reason.into(),
		}
	}

	fn field<T: FromStr>(&self, name: &str, value: Option<&str>) -> Result<T> {
		let value = value.ok_or_else(|| self.error(format!("missing {}", name)))?;
		value
			.parse()
			.map_err(|_| self.error(format!("bad {} {:?}", name, value)))
	}

	fn parse(&self, text: &str) -> Result<Sample> {
		let mut fields = text.split_whitespace();

		let t_ms = self.field("timestamp", fields.next())?;

		let mut slots: Slots = [None; 4];
		for (i, slot) in slots.iter_mut().enumerate() {
			let x: u16 = self.field(&format!("x{}", i), fields.next())?;
			let y: u16 = self.field(&format!("y{}", i), fields.next())?;
			if x > SLOT_MAX || y > SLOT_MAX {
				return Err(self.error(format!("slot {} out of range: ({}, {})", i, x, y)));
			}
			*slot = RawDot::from_wire(x, y);
		}

		let accel = Vec3::new(
			self.field("ax", fields.next())?,
			self.field("ay", fields.next())?,
			self.field("az", fields.next())?,
		);

		if let Some(extra) = fields.next() {
			return Err(self.error(format!("unexpected trailing field {:?}", extra)));
		}

		Ok(Sample { t_ms, slots, accel })
	}
}

impl<R: BufRead> InputModule for TraceInput<R> {
	fn run(&mut self) -> Result<Option<Sample>> {
		loop {
			self.buf.clear();
			if self.reader.read_line(&mut self.buf)? == 0 {
				return Ok(None);
			}
			self.line += 1;

			let text = self.buf.trim();
			if text.is_empty() || text.starts_with('#') {
				continue;
			}
			return self.parse(text).map(Some);
		}
	}
}
