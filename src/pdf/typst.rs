use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{OverdueError, Result};
use crate::report::ReportData;

const TYPST_BIN: &str = "typst";

/// Embedded Typst template for the overdue-bills report
/// Uses a placeholder that gets replaced with the actual JSON file path
const REPORT_TEMPLATE: &str = r##"// Overdue Bills Report Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")
#let accent = rgb("#40897c")

#set page(
  paper: "a4",
  margin: (top: 12mm, bottom: 20mm, x: 14mm),
  footer: context [
    #set text(size: 9pt, fill: rgb(100, 100, 100))
    #grid(
      columns: (1fr, auto),
      align: (center, right),
      [#data.footer],
      [Página #counter(page).display() de #counter(page).final().first()],
    )
  ],
)

#set text(font: "Helvetica", size: 10pt, lang: "pt")

// Header band
#block(width: 100%, fill: accent, inset: (y: 14pt), radius: 3pt)[
  #set align(center)
  #text(size: 22pt, weight: "bold", fill: white)[#data.title]
  #v(2pt)
  #text(size: 12pt, fill: white)[Gerado em: #data.generated_date]
]

#v(8pt)
#text(size: 12pt, weight: "bold")[Filtro aplicado: #data.filter_description]
#v(6pt)

// Summary tiles
#grid(
  columns: (1fr, 1fr, 1fr),
  column-gutter: 10pt,
  ..data.tiles.map(tile => block(width: 100%, fill: rgb(tile.fill), inset: 10pt, radius: 3pt)[
    #text(size: 10pt)[#tile.label] \
    #text(size: 14pt, weight: "bold")[#tile.value]
  ])
)

#v(10pt)

// Bucket legend
#text(size: 10pt)[Legenda:]
#v(4pt)
#grid(
  columns: (1fr, 1fr, 1fr, 1fr),
  column-gutter: 10pt,
  ..data.legend.map(entry => stack(
    spacing: 4pt,
    rect(width: 100%, height: 6pt, fill: rgb(entry.color), radius: 1pt),
    text(size: 10pt)[#entry.label],
  ))
)

#v(12pt)

// Bills table, one row per bill colored by bucket
#table(
  columns: (auto, 1fr, auto, auto, auto, auto),
  align: (left, left, right, center, right, center),
  inset: 6pt,
  stroke: 0.5pt + white,
  fill: (x, y) => if y == 0 { accent } else { rgb(data.rows.at(y - 1).color) },

  table.header(
    ..("Código", "Cliente", "Valor", "Vencimento", "Dias em Atraso", "Status").map(h => text(fill: white, weight: "bold")[#h])
  ),

  ..data.rows.map(row => (
    row.code,
    row.name,
    row.amount,
    row.due_date,
    row.days,
    row.status,
  )).flatten()
)
"##;

/// Generate the report PDF using Typst CLI
pub fn generate_report_pdf(report_data: &ReportData, output_path: &Path) -> Result<()> {
    // Check if typst is available
    if Command::new(TYPST_BIN).arg("--version").output().is_err() {
        return Err(OverdueError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join(format!("overdue-{}", std::process::id()));
    with_scratch_dir(&temp_dir, |dir| compile_report(TYPST_BIN, dir, report_data, output_path))
}

/// Run `body` inside a freshly created `dir`, removing it afterwards on
/// every path.
fn with_scratch_dir<T>(dir: &Path, body: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    std::fs::create_dir_all(dir)?;
    let result = body(dir);
    let _ = std::fs::remove_dir_all(dir);
    result
}

fn compile_report(
    typst: &str,
    work_dir: &Path,
    report_data: &ReportData,
    output_path: &Path,
) -> Result<()> {
    let json_data = serde_json::to_string(report_data)
        .map_err(|e| OverdueError::PdfGeneration(e.to_string()))?;

    let json_path = work_dir.join("report_data.json");
    std::fs::write(&json_path, &json_data)?;

    let template_content = REPORT_TEMPLATE.replace("DATA_JSON_PATH", "report_data.json");
    let template_path = work_dir.join("report.typ");
    std::fs::write(&template_path, &template_content)?;

    debug!(template = %template_path.display(), "running typst compile");
    let output = Command::new(typst)
        .arg("compile")
        .arg("--root")
        .arg(work_dir)
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OverdueError::PdfGeneration(stderr.to_string()));
    }

    Ok(())
}
