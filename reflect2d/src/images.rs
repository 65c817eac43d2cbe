use super::*;
use std::collections::HashSet;

/// The apparent position of a point, as seen through a chain of mirrors.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualImage {
    pub point: Point,
    /// The mirrors the source point was reflected across, in the order
    /// the reflections were applied. Never empty.
    pub axes: Vec<Mirror>,
}

impl VirtualImage {
    /// The number of reflections that produced this image.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.axes.len()
    }

    /// The linear part of the isometry mapping the source to this image.
    ///
    /// Applying it to a vector attached to the source (its "forward" direction,
    /// for instance) gives the corresponding vector attached to this image.
    #[must_use]
    pub fn linear_part(&self) -> Matrix2<Float> {
        self.axes
            .iter()
            .fold(Matrix2::identity(), |acc, mirror| {
                mirror.reflection_matrix() * acc
            })
    }

    /// Whether this image is seen "flipped", that is, it took an odd number of
    /// (non-degenerate) reflections to produce it.
    #[inline]
    #[must_use]
    pub fn is_mirrored(&self) -> bool {
        self.linear_part().determinant() < 0.0
    }
}

/// Rounds a point's coordinates to a fixed number of decimal digits.
///
/// Two images with the same key are considered to be the same image.
///
/// `-0.0` and `0.0` share a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageKey(u64, u64);

impl ImageKey {
    #[inline]
    #[must_use]
    pub fn new(p: &Point, precision: u32) -> Self {
        let scale = (10.0 as Float).powi(precision as i32);
        Self(quantize(p.x, scale), quantize(p.y, scale))
    }
}

// The bits of the rounded, scaled coordinate. Rounded floats are exact integers,
// so they never saturate the way an integer cast would.
fn quantize(coord: Float, scale: Float) -> u64 {
    let rounded = (coord * scale).round();
    // coordinates too large to be scaled are compared exactly
    let rounded = if rounded.is_finite() { rounded } else { coord };
    (rounded + 0.0).to_bits()
}

/// Breadth-first virtual image generation, with a bounded reflection depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageGenerator {
    max_depth: usize,
    precision: u32,
}

impl Default for ImageGenerator {
    #[inline]
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            precision: DEFAULT_PRECISION,
        }
    }
}

// A queued image. Provenance is stored as a link to the node it was reflected from.
struct Node {
    point: Point,
    depth: usize,
    mirror: usize,
    parent: Option<usize>,
}

impl ImageGenerator {
    /// Fails if `precision` exceeds [`MAX_PRECISION`]. See [`Config::precision`].
    #[inline]
    pub fn new(max_depth: usize, precision: u32) -> Result<Self> {
        crate::config::check_precision(precision).map_err(|err| {
            log::warn!("rejecting image generator with a precision of {precision} digits");
            err
        })?;

        Ok(Self {
            max_depth,
            precision,
        })
    }

    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Returns every distinct virtual image of `source` reachable by composing
    /// at most `self.max_depth` reflections across `mirrors`, in discovery order.
    ///
    /// The source itself is never returned, and when several chains of mirrors lead
    /// to the same image, the first one found (thus, one of the shortest) is kept.
    ///
    /// The amount of work grows like `mirrors.len() ^ max_depth`.
    pub fn generate(
        &self,
        source: &Point,
        mirrors: &(impl MirrorSet + ?Sized),
    ) -> Vec<VirtualImage> {
        let mirrors = mirror_list(mirrors);

        let mut seen = HashSet::from([ImageKey::new(source, self.precision)]);
        let mut nodes: Vec<Node> = Vec::new();
        let mut images = Vec::new();

        // the source node is implicit, (`None` below)
        let mut cursor: Option<usize> = None;

        loop {
            let (point, depth) = match cursor {
                None => (*source, 0),
                Some(i) => match nodes.get(i) {
                    Some(node) => (node.point, node.depth),
                    None => break,
                },
            };

            if depth < self.max_depth {
                for (index, mirror) in mirrors.iter().enumerate() {
                    let reflected = reflect_point(&point, mirror);

                    if seen.insert(ImageKey::new(&reflected, self.precision)) {
                        nodes.push(Node {
                            point: reflected,
                            depth: depth + 1,
                            mirror: index,
                            parent: cursor,
                        });

                        images.push(VirtualImage {
                            point: reflected,
                            axes: provenance(&nodes, nodes.len() - 1, &mirrors),
                        });
                    }
                }
            }

            cursor = Some(cursor.map_or(0, |i| i + 1));
        }

        log::debug!(
            "{} virtual images from {} mirrors (depth <= {})",
            images.len(),
            mirrors.len(),
            self.max_depth,
        );

        images
    }
}

fn provenance(nodes: &[Node], mut i: usize, mirrors: &[Mirror]) -> Vec<Mirror> {
    let mut axes = Vec::with_capacity(nodes[i].depth);

    loop {
        let node = &nodes[i];
        axes.push(mirrors[node.mirror]);
        match node.parent {
            Some(parent) => i = parent,
            None => break,
        }
    }

    axes.reverse();
    axes
}

/// [`ImageGenerator::generate`], with the default precision.
#[inline]
#[must_use]
pub fn generate_virtual_images(
    source: &Point,
    mirrors: &(impl MirrorSet + ?Sized),
    max_depth: usize,
) -> Vec<VirtualImage> {
    ImageGenerator {
        max_depth,
        ..Default::default()
    }
    .generate(source, mirrors)
}
