//! Long algebraic move notation (`e2e4`, `e7e8q`).

use thiserror::Error;

use crate::board::BoardState;
use crate::movegen::legal_moves_from;
use crate::pieces::Move;
use crate::tt::TranspositionTable;
use crate::types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("malformed move `{0}`")]
    Malformed(String),
    #[error("bad promotion piece `{0}`")]
    BadPromotion(char),
    #[error("`{0}` is not a legal move in this position")]
    Illegal(String),
}

pub fn move_to_uci(mv: &Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(kind) = mv.promotion() {
        s.push(kind.to_char());
    }
    s
}

/// Resolves `txt` against the legal moves so castle, en-passant and
/// promotion flags come out right. A promotion without a suffix picks the
/// queen.
pub fn parse_uci_move(
    tt: &TranspositionTable,
    state: &BoardState,
    txt: &str,
) -> Result<Move, NotationError> {
    let malformed = || NotationError::Malformed(txt.to_string());
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(malformed());
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(malformed)?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(malformed)?;
    let promo = match txt[4..].chars().next() {
        Some(ch) => match PieceKind::from_char(ch.to_ascii_lowercase()) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(NotationError::BadPromotion(ch)),
        },
        None => None,
    };

    legal_moves_from(tt, state, from)
        .into_iter()
        .filter(|m| m.to == to)
        .find(|m| match m.promotion() {
            Some(kind) => kind == promo.unwrap_or(PieceKind::Queen),
            None => promo.is_none(),
        })
        .ok_or_else(|| NotationError::Illegal(txt.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse;

    fn table() -> TranspositionTable {
        TranspositionTable::new(1 << 10)
    }

    #[test]
    fn test_parse_and_print() {
        let tt = table();
        let state = BoardState::default_state();
        let mv = parse_uci_move(&tt, &state, "e2e4").unwrap();
        assert_eq!(move_to_uci(&mv), "e2e4");
        assert_eq!(mv.state.en_passant_target(), Some((Color::White, 4)));
    }

    #[test]
    fn test_castle_flag_resolved() {
        let tt = table();
        let state = parse("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let mv = parse_uci_move(&tt, &state, "e8c8").unwrap();
        assert!(mv.is_castle);
        assert_eq!(
            mv.state.piece_at(coord_to_sq("d8").unwrap()),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
    }

    #[test]
    fn test_promotion_suffix() {
        let tt = table();
        let state = parse("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let knight = parse_uci_move(&tt, &state, "a7a8n").unwrap();
        assert_eq!(knight.promotion(), Some(PieceKind::Knight));
        assert_eq!(move_to_uci(&knight), "a7a8n");

        let bare = parse_uci_move(&tt, &state, "a7a8").unwrap();
        assert_eq!(bare.promotion(), Some(PieceKind::Queen));

        assert_eq!(
            parse_uci_move(&tt, &state, "a7a8k"),
            Err(NotationError::BadPromotion('k'))
        );
    }

    #[test]
    fn test_rejections() {
        let tt = table();
        let state = BoardState::default_state();
        assert_eq!(
            parse_uci_move(&tt, &state, "e2"),
            Err(NotationError::Malformed("e2".into()))
        );
        assert_eq!(
            parse_uci_move(&tt, &state, "z2e4"),
            Err(NotationError::Malformed("z2e4".into()))
        );
        assert_eq!(
            parse_uci_move(&tt, &state, "e2e5"),
            Err(NotationError::Illegal("e2e5".into()))
        );
        // Black piece while White is on move.
        assert_eq!(
            parse_uci_move(&tt, &state, "e7e5"),
            Err(NotationError::Illegal("e7e5".into()))
        );
    }
}
