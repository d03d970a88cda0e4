use wi_core::{ImageView, Point2i, Polygon};

const DX: [isize; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [isize; 8] = [0, -1, -1, -1, 0, 1, 1, 1];
const WEST: u8 = 4;

/// Traces the outer boundary of every 8-connected foreground component.
///
/// Components are visited in raster order of their first pixel. Every
/// boundary pixel is kept; pixels on one-pixel-wide necks appear once per
/// pass over them.
pub fn trace_outer_contours(mask: &ImageView<'_, u8>) -> Vec<Polygon> {
    let width = mask.width();
    let height = mask.height();
    let n = match width.checked_mul(height) {
        Some(v) if v > 0 => v,
        _ => return Vec::new(),
    };

    let mut fg = Vec::with_capacity(n);
    for y in 0..height {
        fg.extend(mask.row(y).iter().map(|&v| u8::from(v != 0)));
    }

    let mut seen = vec![0_u8; n];
    let mut stack = Vec::new();
    let mut contours = Vec::new();

    for start in 0..n {
        if fg[start] == 0 || seen[start] != 0 {
            continue;
        }

        // First pixel of a component in raster order: W, NW, N and NE are all
        // background, which is what the border follower expects.
        contours.push(follow_border(start, &fg, width, height));
        mark_component(start, &fg, &mut seen, &mut stack, width, height);
    }

    contours
}

/// Longest outer contour by vertex count; the first one wins a tie.
pub fn longest_outer_contour(mask: &ImageView<'_, u8>) -> Option<Polygon> {
    let mut best: Option<Polygon> = None;
    for contour in trace_outer_contours(mask) {
        if best.as_ref().is_none_or(|b| contour.len() > b.len()) {
            best = Some(contour);
        }
    }
    best
}

fn follow_border(start: usize, fg: &[u8], width: usize, height: usize) -> Polygon {
    let mut points = vec![point_at(start, width)];

    // Clockwise from the west neighbor: the pixel found here is the one the
    // walk must arrive from to close the loop.
    let Some(last) = (0..8u8)
        .map(|k| (WEST + 8 - k) & 7)
        .find_map(|dir| foreground_neighbor(start, dir, fg, width, height))
    else {
        return Polygon::new(points);
    };

    let mut prev = last;
    let mut cur = start;
    let max_steps = 4 * fg.len() + 4;

    for _ in 0..max_steps {
        let back = direction(cur, prev, width);
        let Some(next) = (1..=8u8)
            .map(|k| (back + k) & 7)
            .find_map(|dir| foreground_neighbor(cur, dir, fg, width, height))
        else {
            break;
        };

        if next == start && cur == last {
            break;
        }

        points.push(point_at(next, width));
        prev = cur;
        cur = next;
    }

    Polygon::new(points)
}

fn mark_component(
    start: usize,
    fg: &[u8],
    seen: &mut [u8],
    stack: &mut Vec<usize>,
    width: usize,
    height: usize,
) {
    stack.clear();
    seen[start] = 1;
    stack.push(start);

    while let Some(p) = stack.pop() {
        for dir in 0..8u8 {
            let Some(nb) = foreground_neighbor(p, dir, fg, width, height) else {
                continue;
            };
            if seen[nb] == 0 {
                seen[nb] = 1;
                stack.push(nb);
            }
        }
    }
}

#[inline]
fn foreground_neighbor(p: usize, dir: u8, fg: &[u8], width: usize, height: usize) -> Option<usize> {
    let x = (p % width) as isize + DX[dir as usize];
    let y = (p / width) as isize + DY[dir as usize];
    if x < 0 || y < 0 {
        return None;
    }

    let (xu, yu) = (x as usize, y as usize);
    if xu >= width || yu >= height {
        return None;
    }

    let nb = yu * width + xu;
    (fg[nb] != 0).then_some(nb)
}

/// Direction index of the step from pixel `from` to its neighbor `to`.
#[inline]
fn direction(from: usize, to: usize, width: usize) -> u8 {
    let dx = (to % width) as isize - (from % width) as isize;
    let dy = (to / width) as isize - (from / width) as isize;
    (0..8u8)
        .find(|&d| DX[d as usize] == dx && DY[d as usize] == dy)
        .unwrap_or(WEST)
}

#[inline]
fn point_at(idx: usize, width: usize) -> Point2i {
    Point2i::new((idx % width) as i32, (idx / width) as i32)
}
