mod dashboard;
mod exports;
mod helpers;
mod selection;
mod workbook;
