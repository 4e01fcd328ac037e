//! Placement geometry
//!
//! Computes the rendered width and height for an embedded image,
//! either fitting the format's page content box (no constraints) or
//! honoring explicit max-width/max-height dimensions. The aspect
//! ratio is always preserved.

use crate::dimension::{parse_dimension, DXA_PER_PX, EMU_PER_DXA};
use crate::error::UnitResult;
use crate::probe::probe_image;

/// The unit system and page content box of a target document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTarget {
    /// OpenDocument text: geometry in dxa
    Odt,
    /// WordprocessingML drawings: geometry in EMU
    Docx,
}

impl SizeTarget {
    /// Page content box (width, height) in this target's native units
    pub fn page_box(self) -> (f64, f64) {
        match self {
            SizeTarget::Odt => (16_697.0, 28_815.0),
            SizeTarget::Docx => (6_120_130.0, 9_251_950.0),
        }
    }

    /// Native units per intrinsic pixel
    fn units_per_px(self) -> f64 {
        match self {
            SizeTarget::Odt => DXA_PER_PX,
            SizeTarget::Docx => DXA_PER_PX * EMU_PER_DXA,
        }
    }

    /// Convert a parsed dxa value into this target's native units
    fn from_dxa(self, dxa: f64) -> f64 {
        match self {
            SizeTarget::Odt => dxa,
            SizeTarget::Docx => dxa * EMU_PER_DXA,
        }
    }
}

/// Compute the rendered size of an image in the target's native units.
///
/// Without constraints the image is scaled uniformly so its largest
/// axis fills the target page box. With constraints, each given bound
/// is parsed as a dimension, clamped against the intrinsic size (no
/// upscaling past either), and the binding axis shrinks the other by
/// the same ratio.
pub fn resize(
    image: &[u8],
    max_width: Option<&str>,
    max_height: Option<&str>,
    target: SizeTarget,
) -> UnitResult<(f64, f64)> {
    let info = probe_image(image)?;
    let intrinsic_w = info.width as f64 * target.units_per_px();
    let intrinsic_h = info.height as f64 * target.units_per_px();

    if max_width.is_none() && max_height.is_none() {
        let (box_w, box_h) = target.page_box();
        // Multiply before dividing so the binding axis lands exactly
        // on the box limit
        return Ok(if box_w / intrinsic_w <= box_h / intrinsic_h {
            (box_w, intrinsic_h * box_w / intrinsic_w)
        } else {
            (intrinsic_w * box_h / intrinsic_h, box_h)
        });
    }

    let bound_w = match max_width {
        Some(raw) => f64::min(target.from_dxa(parse_dimension(raw)?), intrinsic_w),
        None => intrinsic_w,
    };
    let bound_h = match max_height {
        Some(raw) => f64::min(target.from_dxa(parse_dimension(raw)?), intrinsic_h),
        None => intrinsic_h,
    };
    Ok(if bound_w / intrinsic_w <= bound_h / intrinsic_h {
        (bound_w, intrinsic_h * bound_w / intrinsic_w)
    } else {
        (intrinsic_w * bound_h / intrinsic_h, bound_h)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0, 0, 0, 13]);
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data
    }

    #[test]
    fn test_fit_page_box_odt_wide_image() {
        // Wide image: width is the binding axis
        let img = png_bytes(2000, 1000);
        let (w, h) = resize(&img, None, None, SizeTarget::Odt).unwrap();
        assert_eq!(w, 16_697.0);
        assert!((h - 16_697.0 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_page_box_odt_tall_image() {
        let img = png_bytes(500, 4000);
        let (w, h) = resize(&img, None, None, SizeTarget::Odt).unwrap();
        assert_eq!(h, 28_815.0);
        assert!((w - 28_815.0 / 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_page_box_docx() {
        let img = png_bytes(1000, 1000);
        let (w, h) = resize(&img, None, None, SizeTarget::Docx).unwrap();
        // Square image against a portrait box: width binds
        assert_eq!(w, 6_120_130.0);
        assert_eq!(h, 6_120_130.0);
    }

    #[test]
    fn test_max_width_binds() {
        // 100x50 px intrinsic = 1500x750 dxa
        let img = png_bytes(100, 50);
        let (w, h) = resize(&img, Some("50px"), None, SizeTarget::Odt).unwrap();
        assert_eq!(w, 750.0);
        assert_eq!(h, 375.0);
    }

    #[test]
    fn test_max_height_binds() {
        let img = png_bytes(100, 50);
        let (w, h) = resize(&img, None, Some("25px"), SizeTarget::Odt).unwrap();
        assert_eq!(w, 750.0);
        assert_eq!(h, 375.0);
    }

    #[test]
    fn test_constraint_never_upscales() {
        // Bounds larger than the intrinsic size leave it untouched
        let img = png_bytes(100, 50);
        let (w, h) = resize(&img, Some("10000px"), Some("10000px"), SizeTarget::Odt).unwrap();
        assert_eq!(w, 1500.0);
        assert_eq!(h, 750.0);
    }

    #[test]
    fn test_both_constraints_smaller_axis_wins() {
        let img = png_bytes(100, 50);
        let (w, h) = resize(&img, Some("80px"), Some("10px"), SizeTarget::Odt).unwrap();
        // Height bound 150 dxa against intrinsic 750 dxa: ratio 0.2
        assert_eq!(h, 150.0);
        assert_eq!(w, 300.0);
    }

    #[test]
    fn test_constraint_units_emu_target() {
        let img = png_bytes(100, 50);
        // 1in bound = 914400 EMU; intrinsic width = 100 * 9525 = 952500 EMU
        let (w, h) = resize(&img, Some("1in"), None, SizeTarget::Docx).unwrap();
        assert_eq!(w, 914_400.0);
        assert!((h - 457_200.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_constraint_reports_token() {
        let img = png_bytes(100, 50);
        let err = resize(&img, Some("12parsecs"), None, SizeTarget::Odt).unwrap_err();
        assert!(err.to_string().contains("12parsecs"));
    }

    proptest! {
        #[test]
        fn prop_aspect_ratio_preserved(
            iw in 1u32..4000,
            ih in 1u32..4000,
            bound in 1u32..2000,
        ) {
            let img = png_bytes(iw, ih);
            let raw = format!("{}px", bound);
            let (w, h) = resize(&img, Some(raw.as_str()), None, SizeTarget::Odt).unwrap();
            let expected = iw as f64 / ih as f64;
            prop_assert!((w / h - expected).abs() / expected < 1e-9);
        }
    }
}
