mod zip_archive_reader;

pub use zip_archive_reader::ZipArchiveReader;
