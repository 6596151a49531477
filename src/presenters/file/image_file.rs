use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ExtendedColorType, ImageError, ImageFormat};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::render_fractal::RenderError;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::fractal_document::parent_dir;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported image format {extension:?} (expected png, jpg, jpeg or bmp)")]
    UnsupportedFormat { extension: String },
    #[error("cannot render image: {0}")]
    Render(#[from] RenderError),
    #[error("failed to encode image: {0}")]
    Encode(#[from] ImageError),
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Picks the encoder from the file extension, case-insensitively.
pub fn format_for_path(filepath: &Path) -> Result<ImageFormat, ExportError> {
    let extension = filepath
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "bmp" => Ok(ImageFormat::Bmp),
        _ => Err(ExportError::UnsupportedFormat { extension }),
    }
}

/// PNG / JPEG / BMP export through the `image` encoders.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFilePresenter {}

impl ImageFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for ImageFilePresenter {
    type Error = ExportError;

    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> Result<(), Self::Error> {
        let format = format_for_path(filepath)?;
        let io_error = |source: io::Error| ExportError::Io {
            path: filepath.to_path_buf(),
            source,
        };

        let mut file = NamedTempFile::new_in(parent_dir(filepath)).map_err(io_error)?;
        let resolution = buffer.resolution();

        {
            let mut writer = BufWriter::new(file.as_file_mut());
            image::write_buffer_with_format(
                &mut writer,
                buffer.buffer(),
                resolution.width(),
                resolution.height(),
                ExtendedColorType::Rgb8,
                format,
            )?;
            writer.flush().map_err(io_error)?;
        }

        file.persist(filepath).map_err(|failed| io_error(failed.error))?;

        info!(
            path = %filepath.display(),
            width = resolution.width(),
            height = resolution.height(),
            "image exported"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::point::Point;
    use crate::core::data::resolution::Resolution;

    fn checker() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(Resolution::new(4, 3).unwrap());
        buffer
            .set_pixel(Point { x: 1, y: 2 }, Colour::rgb(0xff, 0x00, 0x00))
            .unwrap();
        buffer
    }

    #[test]
    fn formats_follow_the_extension_case_insensitively() {
        assert_eq!(format_for_path(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(format_for_path(Path::new("a.jpg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("a.JpEg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("a.bmp")).unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn other_extensions_are_rejected() {
        for name in ["a.gif", "a.tiff", "no_extension"] {
            assert!(matches!(
                format_for_path(Path::new(name)),
                Err(ExportError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn png_export_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let buffer = checker();

        ImageFilePresenter::new().present(&buffer, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.into_raw(), buffer.buffer().clone());
    }

    #[test]
    fn jpeg_and_bmp_exports_are_readable() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["frame.jpeg", "frame.BMP"] {
            let path = dir.path().join(name);
            ImageFilePresenter::new().present(&checker(), &path).unwrap();

            let decoded = image::open(&path).unwrap().to_rgb8();
            assert_eq!(decoded.dimensions(), (4, 3));
        }
    }

    #[test]
    fn unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.gif");

        let result = ImageFilePresenter::new().present(&checker(), &path);

        assert!(matches!(result, Err(ExportError::UnsupportedFormat { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");

        let result = ImageFilePresenter::new().present(&checker(), &path);

        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn export_replaces_an_existing_image_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut second = checker();
        second
            .set_pixel(Point { x: 0, y: 0 }, Colour::rgb(0x00, 0xff, 0x00))
            .unwrap();

        ImageFilePresenter::new().present(&checker(), &path).unwrap();
        ImageFilePresenter::new().present(&second, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.into_raw(), second.buffer().clone());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_export_leaves_the_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("frame.png");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep.txt"), "kept").unwrap();

        let result = ImageFilePresenter::new().present(&checker(), &blocked);

        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert_eq!(std::fs::read_to_string(blocked.join("keep.txt")).unwrap(), "kept");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
