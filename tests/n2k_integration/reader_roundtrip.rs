//! End-to-end tests: N2kWriter -> .n2k file -> N2kReader.

use n2k_log::{CanMessage, N2kReader, N2kWriter, Result};

use super::{FakeGpsDevice, temp_log};

#[test]
fn written_log_reads_back_identically() -> Result<()> {
    let path = temp_log("roundtrip");
    let mut gps = FakeGpsDevice::new(0x21);

    let mut sent = Vec::new();
    let mut timestamp = 1483389946.197;
    for _ in 0..25 {
        sent.push(CanMessage::from_frame(timestamp, &gps.position_frame()));
        sent.push(CanMessage::from_frame(timestamp + 0.0005, &gps.heading_frame()));
        gps.step(0.05);
        timestamp += 0.05;
    }

    let mut writer = N2kWriter::create(&path)?;
    for msg in &sent {
        writer.on_message_received(msg)?;
    }
    writer.finish()?;

    let read = N2kReader::open(&path)?.read_all()?;
    assert_eq!(read.len(), sent.len());
    for (a, b) in sent.iter().zip(read.iter()) {
        assert_eq!(a.timestamp().to_bits(), b.timestamp().to_bits());
        assert_eq!(a.arbitration_id(), b.arbitration_id());
        assert_eq!(a.dlc(), b.dlc());
        assert_eq!(a.data(), b.data());
    }

    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn appended_log_reads_as_one_stream() -> Result<()> {
    let path = temp_log("append_read");

    for (append, ts) in [(false, 1.0), (true, 2.0), (true, 3.0)] {
        let mut writer = N2kWriter::open(&path, append)?;
        writer.on_message_received(&CanMessage::new_extended(ts, 60928, &[0x01])?)?;
        writer.finish()?;
    }

    let timestamps: Vec<f64> = N2kReader::open(&path)?
        .map(|msg| msg.map(|m| m.timestamp()))
        .collect::<Result<_>>()?;
    assert_eq!(timestamps, [1.0, 2.0, 3.0]);

    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn missing_log_fails_to_open() {
    let path = temp_log("does_not_exist");
    assert!(matches!(
        N2kReader::open(&path),
        Err(n2k_log::Error::IOError(_))
    ));
}
