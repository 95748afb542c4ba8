use std::io::{self, Write};

/// Writer dispatching every buffer to each sink in fixed order; the first
/// sink error aborts the write.
pub struct FanoutWriter<'a> {
    sinks: Vec<&'a mut dyn Write>,
}

impl<'a> FanoutWriter<'a> {
    pub fn new(sinks: Vec<&'a mut dyn Write>) -> Self {
        FanoutWriter { sinks }
    }
}

impl Write for FanoutWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
