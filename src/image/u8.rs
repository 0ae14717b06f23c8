/// Borrowed 8-bit grayscale view with an explicit row stride.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Copy into an owned float plane, keeping the 0..=255 intensity scale.
    pub fn to_f32(&self) -> crate::image::ImageF32 {
        use crate::image::ImageView;
        let mut out = crate::image::ImageF32::new(self.w, self.h);
        for (y, src) in self.rows().enumerate() {
            let dst = &mut out.data[y * self.w..(y + 1) * self.w];
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = s as f32;
            }
        }
        out
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
