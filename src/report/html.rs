use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use crate::config::ArtifactKind;
use crate::constants::{HTML_FS_INFO_MAX_CHARS, HTML_MAX_FILE_ROWS, REPORT_BASENAME};
use crate::models::{split_deleted_records, ArtifactResult, Record, Report};

const STYLE: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #1a202c; padding: 20px; line-height: 1.6; }
.container { max-width: 1400px; margin: 0 auto; background: white; border-radius: 15px; overflow: hidden; }
.header { background: #2d3748; color: white; padding: 40px; text-align: center; }
.header h1 { font-size: 2.5em; margin-bottom: 10px; }
.header .subtitle { font-size: 1.1em; opacity: 0.9; }
.meta-info { background: #f7fafc; padding: 25px 40px; border-bottom: 3px solid #e2e8f0; }
.meta-info p { margin: 8px 0; color: #4a5568; font-size: 0.95em; }
.meta-info strong { color: #2d3748; font-weight: 600; }
.content { padding: 40px; }
.summary-cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 20px; margin-bottom: 40px; }
.card { background: #4a5568; color: white; padding: 25px; border-radius: 12px; }
.card h3 { font-size: 0.9em; opacity: 0.9; margin-bottom: 10px; text-transform: uppercase; letter-spacing: 1px; }
.card .number { font-size: 3em; font-weight: bold; }
.card.success { background: #38a169; }
.card.warning { background: #dd6b20; }
.card.info { background: #3182ce; }
.section { margin-bottom: 40px; }
.section h2 { color: #2d3748; font-size: 1.8em; margin-bottom: 20px; padding-bottom: 10px; border-bottom: 3px solid #4a5568; }
.table-container { overflow-x: auto; background: white; border-radius: 8px; }
table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
thead { background: #2d3748; color: white; }
thead th { padding: 15px; text-align: left; font-weight: 600; text-transform: uppercase; font-size: 0.85em; }
tbody tr { border-bottom: 1px solid #e2e8f0; }
tbody td { padding: 12px 15px; color: #4a5568; }
tbody tr:nth-child(even) { background-color: #fafafa; }
.badge { display: inline-block; padding: 4px 12px; border-radius: 20px; font-size: 0.85em; font-weight: 600; }
.badge.success { background: #c6f6d5; color: #22543d; }
.badge.error { background: #fed7d7; color: #742a2a; }
.badge.warning { background: #feebc8; color: #7b341e; }
.code-block { background: #2d3748; color: #e2e8f0; padding: 20px; border-radius: 8px; overflow-x: auto; font-family: 'Courier New', monospace; font-size: 0.9em; white-space: pre-wrap; word-wrap: break-word; }
.note-box { margin-top: 20px; padding: 15px; background: #fff3cd; border-left: 4px solid #ffc107; border-radius: 4px; color: #856404; }
.pagination-info { margin-top: 20px; padding: 15px; background: #edf2f7; border-radius: 8px; text-align: center; color: #4a5568; }
.footer { background: #f7fafc; padding: 30px; text-align: center; color: #718096; border-top: 3px solid #e2e8f0; }
.no-data { text-align: center; padding: 40px; color: #a0aec0; font-style: italic; }
@media print { body { background: white; padding: 0; } .card { break-inside: avoid; } }";

/// Render the report as a standalone, print-convertible HTML page.
///
/// A display-only derivative of the JSON report: tables for structured
/// artifacts, preformatted blocks for raw-text artifacts, and a status
/// table covering every attempted module including failures.
pub fn render_html(report: &Report) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>Forensic Analysis Report</title>\n");
    html.push_str(&format!("<style>\n{}\n</style>\n", STYLE));
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");

    push_header(&mut html, report);
    html.push_str("<div class=\"content\">\n");
    push_summary_cards(&mut html, report);
    push_deleted_analysis(&mut html, report);
    push_partitions(&mut html, report);
    push_filesystem_info(&mut html, report);
    push_file_listing(&mut html, report);
    push_module_status(&mut html, report);
    html.push_str("</div>\n");
    push_footer(&mut html);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Write the rendered report, namespaced by the session timestamp.
pub fn write_html_report(report: &Report, output_dir: &Path, timestamp: &str) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}_{}.html", timestamp, REPORT_BASENAME));
    fs::write(&path, render_html(report))
        .context(format!("Failed to write HTML report: {}", path.display()))?;

    info!("HTML report saved to {}", path.display());
    Ok(path)
}

fn push_header(html: &mut String, report: &Report) {
    html.push_str("<div class=\"header\">\n<h1>Digital Forensic Analysis Report</h1>\n");
    html.push_str("<p class=\"subtitle\">Sleuth Kit Triage Pipeline</p>\n</div>\n");

    html.push_str("<div class=\"meta-info\">\n");
    html.push_str(&format!(
        "<p><strong>Case ID:</strong> {}</p>\n",
        escape_html(&report.case_id)
    ));
    html.push_str(&format!(
        "<p><strong>Analysis Date:</strong> {}</p>\n",
        escape_html(&report.analysis_date)
    ));
    html.push_str(&format!(
        "<p><strong>Image Analyzed:</strong> {}</p>\n",
        escape_html(&report.image)
    ));
    if let Some(sha256) = &report.image_sha256 {
        html.push_str(&format!(
            "<p><strong>Image SHA-256:</strong> {}</p>\n",
            escape_html(sha256)
        ));
    }
    html.push_str(&format!(
        "<p><strong>Report Generated:</strong> {}</p>\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str("</div>\n");
}

fn push_summary_cards(html: &mut String, report: &Report) {
    let file_count = count_of(report, ArtifactKind::FileListing);
    let deleted_count = count_of(report, ArtifactKind::DeletedFiles);
    let partition_count = count_of(report, ArtifactKind::Partitions);
    let timeline_count = count_of(report, ArtifactKind::Timeline);

    html.push_str("<div class=\"summary-cards\">\n");
    push_card(html, "success", "Total Files", file_count);
    push_card(html, "warning", "Deleted Files", deleted_count);
    push_card(html, "info", "Partitions", partition_count);
    push_card(html, "", "Timeline Entries", timeline_count);
    html.push_str("</div>\n");
}

fn count_of(report: &Report, kind: ArtifactKind) -> usize {
    report
        .get(kind)
        .and_then(ArtifactResult::record_count)
        .unwrap_or(0)
}

fn push_card(html: &mut String, class: &str, title: &str, count: usize) {
    let class_attr = if class.is_empty() {
        "card".to_string()
    } else {
        format!("card {}", class)
    };
    html.push_str(&format!(
        "<div class=\"{}\"><h3>{}</h3><div class=\"number\">{}</div></div>\n",
        class_attr, title, count
    ));
}

fn push_deleted_analysis(html: &mut String, report: &Report) {
    let records = match report
        .get(ArtifactKind::DeletedFiles)
        .and_then(ArtifactResult::records)
    {
        Some(records) if !records.is_empty() => records,
        _ => return,
    };

    let breakdown = split_deleted_records(records);
    html.push_str("<div class=\"section\">\n<h2>Deleted Files Recovery Analysis</h2>\n");
    html.push_str("<div class=\"table-container\">\n<table>\n");
    html.push_str("<thead><tr><th>Category</th><th>Count</th><th>Status</th><th>Description</th></tr></thead>\n<tbody>\n");
    html.push_str(&format!(
        "<tr><td><strong>Total Deleted</strong></td><td>{}</td><td><span class=\"badge warning\">DELETED</span></td><td>All files found in deleted state</td></tr>\n",
        records.len()
    ));
    html.push_str(&format!(
        "<tr><td><strong>Potentially Recoverable</strong></td><td>{}</td><td><span class=\"badge success\">RECOVERABLE</span></td><td>Files with intact metadata, good recovery chance</td></tr>\n",
        breakdown.recoverable.len()
    ));
    html.push_str(&format!(
        "<tr><td><strong>Reallocated (Warning)</strong></td><td>{}</td><td><span class=\"badge error\">OVERWRITTEN</span></td><td>Metadata reused by another file, likely overwritten</td></tr>\n",
        breakdown.realloc.len()
    ));
    html.push_str("</tbody>\n</table>\n</div>\n");
    html.push_str("<div class=\"note-box\"><strong>Note about \"realloc\" files:</strong> \
                   Files marked with \"(realloc)\" have had their metadata structures reallocated to new files. \
                   The original data has likely been overwritten; focus recovery efforts on files without the \
                   realloc indicator.</div>\n");
    html.push_str("</div>\n");
}

fn push_partitions(html: &mut String, report: &Report) {
    let records = match report
        .get(ArtifactKind::Partitions)
        .and_then(ArtifactResult::records)
    {
        Some(records) if !records.is_empty() => records,
        _ => return,
    };

    html.push_str("<div class=\"section\">\n<h2>Disk Partitions</h2>\n");
    html.push_str("<div class=\"table-container\">\n<table>\n");
    html.push_str("<thead><tr><th>Slot</th><th>Start Sector</th><th>End Sector</th><th>Length</th><th>Description</th></tr></thead>\n<tbody>\n");
    for record in records {
        if let Record::Partition(p) = record {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&p.slot),
                escape_html(&p.start),
                escape_html(&p.end),
                escape_html(&p.length),
                escape_html(&p.description)
            ));
        }
    }
    html.push_str("</tbody>\n</table>\n</div>\n</div>\n");
}

fn push_filesystem_info(html: &mut String, report: &Report) {
    html.push_str("<div class=\"section\">\n<h2>Filesystem Information</h2>\n");
    match report
        .get(ArtifactKind::FilesystemInfo)
        .and_then(ArtifactResult::raw_output)
    {
        Some(raw) if !raw.is_empty() => {
            let shown: String = raw.chars().take(HTML_FS_INFO_MAX_CHARS).collect();
            html.push_str(&format!(
                "<div class=\"code-block\">{}</div>\n",
                escape_html(&shown)
            ));
        }
        _ => {
            html.push_str("<div class=\"code-block\">No filesystem information available</div>\n");
        }
    }
    html.push_str("</div>\n");
}

fn push_file_listing(html: &mut String, report: &Report) {
    let records = match report
        .get(ArtifactKind::FileListing)
        .and_then(ArtifactResult::records)
    {
        Some(records) if !records.is_empty() => records,
        _ => return,
    };

    html.push_str("<div class=\"section\">\n<h2>File Listing</h2>\n");
    html.push_str("<div class=\"table-container\">\n<table>\n");
    html.push_str("<thead><tr><th>Type</th><th>Inode</th><th>Name</th><th>Size</th><th>Modified Time</th><th>Permissions</th></tr></thead>\n<tbody>\n");
    for record in records.iter().take(HTML_MAX_FILE_ROWS) {
        if let Record::File(f) = record {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td style=\"word-break: break-all;\">{}</td><td>{}</td><td>{}</td><td><code>{}</code></td></tr>\n",
                escape_html(&f.entry_type),
                escape_html(&f.inode),
                escape_html(&f.name),
                escape_html(&f.size),
                escape_html(&f.mtime),
                escape_html(&f.mode)
            ));
        }
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
    if records.len() > HTML_MAX_FILE_ROWS {
        html.push_str(&format!(
            "<div class=\"pagination-info\">Showing first {} of {} files. See the CSV export for the complete file listing.</div>\n",
            HTML_MAX_FILE_ROWS,
            records.len()
        ));
    }
    html.push_str("</div>\n");
}

fn push_module_status(html: &mut String, report: &Report) {
    html.push_str("<div class=\"section\">\n<h2>Analysis Module Status</h2>\n");
    if report.artifacts.is_empty() {
        html.push_str("<div class=\"no-data\">No analysis modules were run</div>\n</div>\n");
        return;
    }

    html.push_str("<div class=\"table-container\">\n<table>\n");
    html.push_str("<thead><tr><th>Module</th><th>Status</th><th>Details</th></tr></thead>\n<tbody>\n");
    for (kind, result) in &report.artifacts {
        let (badge, status, details) = match result {
            ArtifactResult::Success { records, .. } => {
                let details = match records {
                    Some(records) => format!("{} records", records.len()),
                    None => "Completed".to_string(),
                };
                ("success", "SUCCESS", details)
            }
            ArtifactResult::Failure { error, .. } => ("error", "FAILED", error.clone()),
        };
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td><span class=\"badge {}\">{}</span></td><td>{}</td></tr>\n",
            kind.title(),
            badge,
            status,
            escape_html(&details)
        ));
    }
    html.push_str("</tbody>\n</table>\n</div>\n</div>\n");
}

fn push_footer(html: &mut String) {
    html.push_str("<div class=\"footer\">\n");
    html.push_str(&format!(
        "<p><strong>tsk-triage v{}</strong></p>\n",
        env!("CARGO_PKG_VERSION")
    ));
    html.push_str("<p>Powered by Sleuth Kit</p>\n");
    html.push_str(&format!(
        "<p>Report generated on {}</p>\n",
        Local::now().format("%B %d, %Y at %H:%M:%S")
    ));
    html.push_str("</div>\n");
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
