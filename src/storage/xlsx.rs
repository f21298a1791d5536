use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;
use umya_spreadsheet::Worksheet;

use crate::config::Config;
use crate::error::ExportError;
use crate::models::Product;
use crate::storage::ProductStorage;

const COL_NAME: u32 = 1;
const COL_CODE: u32 = 2;
const COL_CATEGORY: u32 = 3;
const COL_IMAGE: u32 = 4;
const COL_OPTIONS: u32 = 5;

/// Fills a copy of an existing workbook template and saves it under a new name.
#[derive(Debug, Clone)]
pub struct XlsxStorage {
    template_path: PathBuf,
    output_path: PathBuf,
    sheet_name: String,
    first_row: u32,
}

impl XlsxStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            template_path: PathBuf::from(&config.template_path),
            output_path: config.output_path(),
            sheet_name: config.sheet_name.clone(),
            first_row: config.first_row,
        }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }
}

#[async_trait]
impl ProductStorage for XlsxStorage {
    async fn save(&self, products: &[Product]) -> Result<()> {
        // umya reads and writes synchronously; keep it off the runtime threads.
        let storage = self.clone();
        let count = products.len();
        let products = products.to_vec();
        tokio::task::spawn_blocking(move || storage.write_workbook(&products))
            .await
            .context("Workbook writer task failed")??;

        info!("Saved {} products to {}", count, self.output_path.display());
        Ok(())
    }
}

impl XlsxStorage {
    fn write_workbook(&self, products: &[Product]) -> Result<(), ExportError> {
        let mut book = umya_spreadsheet::reader::xlsx::read(&self.template_path).map_err(|e| {
            ExportError::ReadTemplate {
                path: self.template_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let sheet = book
            .get_sheet_by_name_mut(&self.sheet_name)
            .ok_or_else(|| ExportError::MissingSheet(self.sheet_name.clone()))?;
        write_rows(sheet, products, self.first_row);

        umya_spreadsheet::writer::xlsx::write(&book, &self.output_path).map_err(|e| ExportError::Write {
            path: self.output_path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Overwrite one row per product starting at `first_row`; other rows are untouched.
fn write_rows(sheet: &mut Worksheet, products: &[Product], first_row: u32) {
    for (row, product) in (first_row..).zip(products) {
        sheet.get_cell_mut((COL_NAME, row)).set_value_string(product.name.as_str());
        sheet.get_cell_mut((COL_CODE, row)).set_value_string(product.code.as_str());
        sheet
            .get_cell_mut((COL_CATEGORY, row))
            .set_value_string(product.category.path());
        sheet.get_cell_mut((COL_IMAGE, row)).set_value_string(product.image_src.as_str());
        sheet
            .get_cell_mut((COL_OPTIONS, row))
            .set_value_string(product.options_display());
    }
}
