use super::*;

/// Places mines at exactly the given coordinates, used to replay or stage a board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(self, options: GameOptions) -> MineLayout {
        let size = options.size();
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for coords in self.mines {
            if coords.0 < size.0 && coords.1 < size.1 {
                mine_mask[coords.to_nd_index()] = true;
            } else {
                log::warn!("Dropping mine outside of the board at {:?}", coords);
            }
        }
        MineLayout::from_mine_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_given_mines_and_drops_outside_ones() {
        let generator = FixedMineGenerator::new([(0, 1), (1, 1), (5, 5), (1, 1)]);

        let layout = generator.generate(GameOptions::new(3, 2, 0));

        assert_eq!(layout.size(), (2, 3));
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((0, 1)));
        assert!(layout.contains_mine((1, 1)));
    }
}
