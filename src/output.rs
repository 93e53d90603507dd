use pciscan_db::{PciDatabase, UNKNOWN};
use pciscan_enumerate::{resolve, Device};
use std::io::{self, Write};

fn class_name(device: &Device<'_>) -> String {
    if device.subclass().name != UNKNOWN {
        return device.subclass().name.clone();
    }
    if device.class().name != UNKNOWN {
        return device.class().name.clone();
    }
    match device.device_type() {
        Some(kind) => format!("{:?}", kind),
        None => UNKNOWN.to_owned(),
    }
}

/// `lspci`-like listing, one device per line plus an indented subsystem line.
pub fn write_text<W: Write, D: PciDatabase + ?Sized>(
    out: &mut W,
    db: &D,
    devices: &[Device<'_>],
) -> io::Result<()> {
    for device in devices {
        let vendor = device.vendor();
        let product = device.product();
        write!(
            out,
            "{} {} [{}{}]: {} {} [{}:{}]",
            device.address(),
            class_name(device),
            device.class().id,
            device.subclass().id,
            vendor.name,
            product.name,
            vendor.id,
            product.id,
        )?;
        let interface = device.programming_interface();
        if interface.name != UNKNOWN {
            write!(out, " (prog-if {} [{}])", interface.id, interface.name)?;
        }
        writeln!(out)?;

        let subsystem = device.subsystem();
        let subvendor = resolve::vendor(db, &subsystem.vendor_id);
        writeln!(
            out,
            "\tSubsystem: {} {} [{}:{}]",
            subvendor.name, subsystem.name, subsystem.vendor_id, subsystem.id
        )?;
    }
    Ok(())
}

pub fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pciscan_access::{Address, Modalias};
    use pciscan_db::PciIds;

    const IDS: &str = "\
10de  NVIDIA Corporation
\t1c82  GP107 [GeForce GTX 1050 Ti]
\t\t1043 8613  Phoenix GeForce GTX 1050 Ti
1043  ASUSTeK Computer Inc.
C 03  Display controller
\t00  VGA compatible controller
\t\t00  VGA controller
";

    fn device<'db>(db: &'db PciIds, blob: &str) -> Device<'db> {
        let modalias = Modalias::decode(blob.as_bytes()).unwrap();
        resolve::device(db, Address::new(0, 3, 0, 0), &modalias)
    }

    #[test]
    fn text_listing() {
        let db = PciIds::parse(IDS);
        let devices = [device(&db, "pci:v000010DEd00001C82sv00001043sd00008613bc03sc00i00")];
        let mut out = Vec::new();
        write_text(&mut out, &db, &devices).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0000:03:00.0 VGA compatible controller [0300]: NVIDIA Corporation GP107 [GeForce GTX 1050 Ti] [10de:1c82] (prog-if 00 [VGA controller])\n\
             \tSubsystem: ASUSTeK Computer Inc. Phoenix GeForce GTX 1050 Ti [1043:8613]\n"
        );
    }

    #[test]
    fn unknown_class_falls_back_to_device_type() {
        let db = PciIds::parse(IDS);
        let devices = [device(&db, "pci:v00001AF4d00001000sv00001AF4sd00000001bc02sc00i00")];
        let mut out = Vec::new();
        write_text(&mut out, &db, &devices).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("0000:03:00.0 EthernetController [0200]: unknown unknown [1af4:1000]\n"));
        assert!(text.ends_with("\tSubsystem: unknown unknown [1af4:0001]\n"));
    }

    #[test]
    fn json_listing() {
        let db = PciIds::parse(IDS);
        let devices = [device(&db, "pci:v000010DEd00001C82sv00001043sd00008613bc03sc00i00")];
        let mut out = Vec::new();
        write_json(&mut out, &devices[..]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["address"], "0000:03:00.0");
        assert_eq!(value[0]["product"]["name"], "GP107 [GeForce GTX 1050 Ti]");
        assert_eq!(value[0]["programming_interface"]["name"], "VGA controller");
    }
}
