//! Export helpers for CSV samples and JSON sidecars.

pub mod samples {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    pub const HEADER: &str = "series,index,t,x,y";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard sample CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row: one sample of a named series. `t` is empty for untimed series.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub series: &'a str,
        pub index: usize,
        pub t: Option<f64>,
        pub x: f64,
        pub y: f64,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            match self.t {
                Some(t) => writeln!(
                    writer,
                    "{},{},{:.6},{:.9},{:.9}",
                    self.series, self.index, t, self.x, self.y
                ),
                None => writeln!(
                    writer,
                    "{},{},,{:.9},{:.9}",
                    self.series, self.index, self.x, self.y
                ),
            }
        }
    }

    /// Write every sample of one series.
    pub fn write_series(
        writer: &mut dyn Write,
        series: &str,
        x: &[f64],
        y: &[f64],
        t: Option<&[f64]>,
    ) -> io::Result<usize> {
        let mut written = 0;
        for (index, (&x, &y)) in x.iter().zip(y).enumerate() {
            let record = Record {
                series,
                index,
                t: t.and_then(|t| t.get(index).copied()),
                x,
                y,
            };
            record.write_to(writer)?;
            written += 1;
        }
        Ok(written)
    }
}

pub mod sidecar {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// One named series in the JSON sidecar.
    #[derive(Debug, Clone, Serialize)]
    pub struct SeriesData<'a> {
        pub name: &'a str,
        pub role: &'a str,
        pub x: &'a [f64],
        pub y: &'a [f64],
        #[serde(skip_serializing_if = "Option::is_none")]
        pub t: Option<&'a [f64]>,
    }

    /// Playback settings for the notebook player.
    #[derive(Debug, Clone, Serialize)]
    pub struct Playback<'a> {
        pub frame_duration_ms: u32,
        pub transition_duration_ms: u32,
        pub loop_playback: bool,
        pub play_label: &'a str,
        pub pause_label: &'a str,
        pub slider_prefix: &'a str,
    }

    /// Metadata describing the exported scene.
    #[derive(Debug, Clone, Serialize)]
    pub struct Metadata<'a> {
        pub scene: &'a str,
        pub kind: &'a str,
        pub generated_utc: &'a str,
        pub theme: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub eccentricity: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub semi_major_axis: Option<f64>,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        #[serde(flatten)]
        meta: &'a Metadata<'a>,
        playback: &'a Playback<'a>,
        series: &'a [SeriesData<'a>],
    }

    /// Write the scene sidecar as pretty-printed JSON.
    pub fn write_sidecar(
        output: &Path,
        meta: &Metadata<'_>,
        playback: &Playback<'_>,
        series: &[SeriesData<'_>],
    ) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let sidecar = Sidecar {
            meta,
            playback,
            series,
        };
        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::samples::{self, Record};

    #[test]
    fn untimed_records_leave_t_empty() {
        let mut buf: Vec<u8> = Vec::new();
        Record {
            series: "ellipse",
            index: 3,
            t: None,
            x: 0.5,
            y: -0.25,
        }
        .write_to(&mut buf)
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ellipse,3,,0.500000000,-0.250000000\n"
        );
    }

    #[test]
    fn series_rows_follow_header_order() {
        let mut buf: Vec<u8> = Vec::new();
        samples::write_header(&mut buf).unwrap();
        let written = samples::write_series(
            &mut buf,
            "orbit",
            &[1.0, 0.0],
            &[0.0, 1.0],
            Some(&[0.0, 0.5]),
        )
        .unwrap();
        assert_eq!(written, 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], samples::HEADER);
        assert_eq!(lines[2], "orbit,1,0.500000,0.000000000,1.000000000");
    }
}
