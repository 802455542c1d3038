use crate::domain::Appointment;

pub struct CsvExporter;

impl CsvExporter {
    const HEADER: [&'static str; 9] = [
        "id",
        "petId",
        "petName",
        "customerName",
        "customerEmail",
        "customerPhone",
        "date",
        "time",
        "status",
    ];

    /// Writes one row per appointment to `filename`. Returns the filename on success.
    pub fn export_appointments(appointments: &[Appointment], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;
        Self::write_rows(&mut writer, appointments)?;
        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }

    fn write_rows<W: std::io::Write>(writer: &mut csv::Writer<W>, appointments: &[Appointment]) -> Result<(), String> {
        writer.write_record(Self::HEADER).map_err(|e| e.to_string())?;
        for a in appointments {
            writer
                .write_record([
                    a.id.as_str(),
                    a.pet_id.as_str(),
                    a.pet_name.as_str(),
                    a.customer_name.as_str(),
                    a.customer_email.as_str(),
                    a.customer_phone.as_str(),
                    a.date.as_str(),
                    a.time.as_str(),
                    a.status.as_str(),
                ])
                .map_err(|e| format!("Failed to write appointment {}: {}", a.id, e))?;
        }
        Ok(())
    }
}
