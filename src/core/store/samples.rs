//! Sample catalog used by `parts init --sample`

use super::{upsert_on, PartStore, StoreError};
use crate::entities::part::{Part, PartFields, PartKey, PartStatus};

/// (part_number, revision, description, where_used, status, folder_path, file_names)
const SAMPLES: &[(&str, &str, &str, &str, PartStatus, &str, &str)] = &[
    ("PN001", "A", "Widget Assembly Base Unit", "Assy-101, Assy-202", PartStatus::Active, r"C:\Projects\WidgetLine", "base.dwg, BOM.xlsx, spec.pdf"),
    ("PN002", "B", "Control Module v2", "Product X, Product Y Rev C", PartStatus::Active, r"C:\Designs\Controls", "module_v2.step, wiring.pdf"),
    ("PN003", "A", "Sensor Housing Stainless", "Assy-303, Test Fixture 4", PartStatus::Active, r"C:\Parts\Housings", "housing_v1.igs, 003_revA.pdf"),
    ("PN004", "C", "Gearbox 90deg 1:5 ratio", "Robot Arm v3, Conveyor B", PartStatus::Obsolete, "", "old_gearbox.stp"),
    ("PN005", "A", "Power Supply 24V 5A", "Control Cabinet A, Backup Unit", PartStatus::Active, r"C:\Purchased\PSU", "MEANWELL_LRS-100.pdf"),
    ("PN006", "A", "Mounting Bracket Left", "Assy-101, Assy-202", PartStatus::New, r"C:\Brackets", "left_bracket.SLDPRT"),
    ("PN007", "B", "Mounting Bracket Right", "Assy-101, Assy-202", PartStatus::Active, r"C:\Brackets", "right_bracket_revB.SLDPRT, DXF_export.dxf"),
    ("PN101", "1", "Main Chassis Weldment", "Product X Final, Product Y", PartStatus::Active, r"C:\Weldments\Main", "chassis_v1.dwg"),
];

impl PartStore {
    /// Upsert the sample parts, stamped with the current time
    ///
    /// Returns the number of samples written.
    pub fn seed_samples(&mut self) -> Result<usize, StoreError> {
        let now = self.now();
        let tx = self.conn.transaction()?;
        for (part_number, revision, description, where_used, status, folder_path, file_names) in
            SAMPLES
        {
            let fields = PartFields {
                description: Some(description.to_string()),
                where_used: Some(where_used.to_string()),
                status: *status,
                folder_path: Some(folder_path.to_string()),
                file_names: Some(file_names.to_string()),
            }
            .normalized();
            let part = Part::new(PartKey::new(*part_number, *revision), fields, now.clone());
            upsert_on(&tx, &part)?;
        }
        tx.commit()?;

        tracing::info!(count = SAMPLES.len(), "seeded sample parts");
        Ok(SAMPLES.len())
    }
}
